use std::collections::HashMap;
use std::iter::FromIterator;

use tracing::debug;

use super::Object;

/// A handle to one scope inside an `Environment`.
///
/// Handles are only meaningful for the environment that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

#[derive(Debug, Default)]
struct Scope {
    values: HashMap<String, Object>,
    enclosing: Option<ScopeId>,
}

/// Every scope of an interpreter session, stored in one arena.
///
/// Scopes point at their enclosing scope by `ScopeId` rather than by owning
/// pointer. A closure holds the `ScopeId` of the scope it was defined in,
/// which keeps that scope reachable for as long as the session lives. A
/// recursive function is bound inside the very scope its closure refers to;
/// with ids that is just a number, not a reference cycle, and the whole arena
/// goes away when the `Environment` is dropped.
///
/// ```notrust
///     scopes: [ global | call | call | call ]
///                 ^        |      |      |
///                 +--------+      |      |
///                 ^               |      |
///                 +---------------+      |
///                                 ^      |
///                                 +------+
/// ```
///
/// Scopes created for a function call are reclaimed when the call returns,
/// but only if they sit above every scope any closure has ever captured (see
/// `release`). That mark only moves up. Once a closure captures a scope, that
/// scope and every scope below it stay allocated until the `Environment` is
/// dropped, even after the closure itself is gone.
#[derive(Debug)]
pub struct Environment {
    scopes: Vec<Scope>,
    // Highest index any closure has captured. Scopes at or below it stay.
    captured: usize,
}

impl Environment {
    /// Creates an environment holding a single empty global scope.
    #[must_use]
    pub fn new() -> Self {
        Environment {
            scopes: vec![Scope::default()],
            captured: 0,
        }
    }

    /// The session's root scope.
    #[must_use]
    pub fn global(&self) -> ScopeId {
        ScopeId(0)
    }

    /// Creates a fresh, empty scope whose enclosing scope is `outer`.
    pub fn new_enclosed(&mut self, outer: ScopeId) -> ScopeId {
        self.scopes.push(Scope {
            values: HashMap::new(),
            enclosing: Some(outer),
        });

        ScopeId(self.scopes.len() - 1)
    }

    /// Returns the value of `name` in the first scope it's found in, starting
    /// at `scope` and following the chain of enclosing scopes.
    ///
    /// # Returns
    /// Returns `None` if no scope in the chain binds `name`.
    #[must_use]
    pub fn get(&self, scope: ScopeId, name: &str) -> Option<Object> {
        self.walker(scope)
            .find_map(|s| s.values.get(name))
            .cloned()
    }

    /// Binds `name` to `value` in `scope` itself. An enclosing scope binding
    /// the same name is shadowed, never modified.
    ///
    /// # Panics
    /// Panics if `scope` does not belong to this environment.
    pub fn set(&mut self, scope: ScopeId, name: String, value: Object) {
        self.scopes[scope.0].values.insert(name, value);
    }

    /// Records that a closure now refers to `scope`, so it must outlive any
    /// call that is currently running.
    ///
    /// Captures are never forgotten. `scope` and every scope below it are
    /// pinned for the rest of the session.
    pub fn capture(&mut self, scope: ScopeId) -> ScopeId {
        self.captured = self.captured.max(scope.0);
        scope
    }

    /// Drops `scope` and every scope created after it, unless a closure
    /// captured one of them.
    ///
    /// `scope` must be the scope created for a function call that has just
    /// returned. Every scope created during that call sits above it in the
    /// arena, and the only handles that can outlive the call are the ones
    /// closures captured.
    pub fn release(&mut self, scope: ScopeId) {
        if scope.0 > self.captured {
            self.scopes.truncate(scope.0);
        } else {
            debug!(
                scope = scope.0,
                captured = self.captured,
                "call scope kept alive by a closure"
            );
        }
    }

    /// The number of scopes currently alive, the global scope included.
    #[must_use]
    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    fn walker(&self, scope: ScopeId) -> ScopeWalker {
        ScopeWalker {
            scopes: &self.scopes,
            current: Some(scope),
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

/// Constructs an environment whose global scope holds the given bindings.
impl FromIterator<(String, Object)> for Environment {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = (String, Object)>,
    {
        let mut values = HashMap::new();
        values.extend(iter);

        Environment {
            scopes: vec![Scope {
                values,
                enclosing: None,
            }],
            captured: 0,
        }
    }
}

/// Walks from a scope outwards to the global scope.
struct ScopeWalker<'a> {
    scopes: &'a [Scope],
    current: Option<ScopeId>,
}

impl<'a> Iterator for ScopeWalker<'a> {
    type Item = &'a Scope;

    fn next(&mut self) -> Option<Self::Item> {
        let scope = self.scopes.get(self.current?.0)?;
        self.current = scope.enclosing;
        Some(scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_can_store_and_retrieve_objects() {
        let mut environment = Environment::new();
        let global = environment.global();

        environment.set(global, "foo".to_owned(), Object::Integer(42));

        assert_eq!(Some(Object::Integer(42)), environment.get(global, "foo"));
    }

    #[test]
    fn it_returns_none_if_the_queried_object_doesnt_exist() {
        let environment = Environment::new();

        assert_eq!(None, environment.get(environment.global(), "foo"));
    }

    #[test]
    fn it_can_find_an_object_at_a_higher_level() {
        let mut environment = Environment::new();
        let global = environment.global();

        environment.set(global, "foo".to_owned(), Object::Integer(42));
        let middle = environment.new_enclosed(global);
        environment.set(middle, "bar".to_owned(), Object::Integer(100));
        let inner = environment.new_enclosed(middle);

        assert_eq!(Some(Object::Integer(42)), environment.get(inner, "foo"));
        assert_eq!(Some(Object::Integer(100)), environment.get(inner, "bar"));
        assert_eq!(None, environment.get(global, "bar"));
    }

    #[test]
    fn it_returns_the_first_matching_object() {
        let mut environment = Environment::new();
        let global = environment.global();

        environment.set(global, "foo".to_owned(), Object::Integer(42));
        let inner = environment.new_enclosed(global);
        environment.set(inner, "foo".to_owned(), Object::Integer(100));

        assert_eq!(Some(Object::Integer(100)), environment.get(inner, "foo"));
        assert_eq!(Some(Object::Integer(42)), environment.get(global, "foo"));
    }

    #[test]
    fn it_can_update_an_existing_value() {
        let mut environment = Environment::new();
        let global = environment.global();

        environment.set(global, "foo".to_owned(), Object::Integer(42));
        environment.set(global, "foo".to_owned(), Object::from("bar"));

        assert_eq!(Some(Object::from("bar")), environment.get(global, "foo"));
    }

    #[test]
    fn it_lets_sibling_scopes_share_a_parent() {
        let mut environment = Environment::new();
        let global = environment.global();
        environment.set(global, "shared".to_owned(), Object::Integer(1));

        let left = environment.new_enclosed(global);
        let right = environment.new_enclosed(global);
        environment.set(left, "x".to_owned(), Object::Integer(2));

        assert_eq!(Some(Object::Integer(1)), environment.get(right, "shared"));
        assert_eq!(None, environment.get(right, "x"));
    }

    #[test]
    fn it_reclaims_uncaptured_call_scopes() {
        let mut environment = Environment::new();
        let global = environment.global();

        let call = environment.new_enclosed(global);
        environment.new_enclosed(call);
        assert_eq!(3, environment.scope_count());

        environment.release(call);
        assert_eq!(1, environment.scope_count());
    }

    #[test]
    fn it_keeps_captured_call_scopes() {
        let mut environment = Environment::new();
        let global = environment.global();

        let call = environment.new_enclosed(global);
        environment.set(call, "x".to_owned(), Object::Integer(2));
        environment.capture(call);

        environment.release(call);
        assert_eq!(2, environment.scope_count());
        assert_eq!(Some(Object::Integer(2)), environment.get(call, "x"));

        // later calls above the captured scope are still reclaimed
        let later = environment.new_enclosed(global);
        environment.release(later);
        assert_eq!(2, environment.scope_count());
    }

    #[test]
    fn it_pins_every_scope_below_the_deepest_capture() {
        let mut environment = Environment::new();
        let global = environment.global();

        let outer = environment.new_enclosed(global);
        let inner = environment.new_enclosed(outer);
        environment.capture(inner);

        // nothing refers to `outer` any more, but it sits below a capture
        environment.release(inner);
        environment.release(outer);
        assert_eq!(3, environment.scope_count());

        let later = environment.new_enclosed(global);
        assert_eq!(ScopeId(3), later);
        environment.release(later);
        assert_eq!(3, environment.scope_count());
    }

    #[test]
    fn it_can_be_built_from_an_iterator() {
        let environment = vec![
            ("foo".to_owned(), Object::Integer(42)),
            ("bar".to_owned(), Object::Null),
            ("baz".to_owned(), Object::from("baz")),
        ]
        .into_iter()
        .collect::<Environment>();
        let global = environment.global();

        assert_eq!(Some(Object::Integer(42)), environment.get(global, "foo"));
        assert_eq!(Some(Object::Null), environment.get(global, "bar"));
        assert_eq!(Some(Object::from("baz")), environment.get(global, "baz"));
    }
}
