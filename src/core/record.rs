// blazestd - core/record.rs
//
// Minimal record type used to exercise object passing between compiled
// Blaze code and the runtime.

/// Single-field record passed across the runtime boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Person {
    pub a: i32,
}

impl Person {
    pub fn new(a: i32) -> Self {
        Self { a }
    }
}

/// Hand back the very record that was passed in.
pub fn accept_obj(person: &mut Person) -> &mut Person {
    person
}

/// Owned counterpart of [`accept_obj`].
pub fn accept_owned(person: Person) -> Person {
    person
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_obj_returns_same_record() {
        let mut p = Person::new(7);
        let original: *const Person = &p;
        let returned = accept_obj(&mut p);
        assert!(std::ptr::eq(returned, original));
        returned.a = 9;
        assert_eq!(p.a, 9);
    }

    #[test]
    fn test_accept_owned_is_identity() {
        assert_eq!(accept_owned(Person::new(-3)), Person { a: -3 });
    }
}
