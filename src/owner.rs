/// The party holding an account.  Accounts only ever borrow their owner.
pub trait Owner {
    fn full_name(&self) -> String;
}

impl<T: Owner + ?Sized> Owner for &T {
    fn full_name(&self) -> String {
        (**self).full_name()
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Person {
    first: String,
    last: String,
}

impl Person {
    pub fn new<S: Into<String>, T: Into<String>>(first: S, last: T) -> Person {
        Person {
            first: first.into(),
            last: last.into(),
        }
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn last(&self) -> &str {
        &self.last
    }
}

impl Owner for Person {
    fn full_name(&self) -> String {
        format!("{} {}", self.first, self.last)
    }
}
