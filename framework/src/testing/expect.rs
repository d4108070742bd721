//! Fluent assertions
//!
//! `expect!(value).to_equal(expected)` panics with an expected/received
//! report and the call site.

use std::fmt::Debug;

pub struct Expect<T> {
    value: T,
    location: &'static str,
}

impl<T> Expect<T> {
    /// Use the `expect!` macro instead
    pub fn new(value: T, location: &'static str) -> Self {
        Self { value, location }
    }

    fn fail(&self, matcher: &str, expected: impl Debug, received: impl Debug) -> ! {
        panic!(
            "\nassertion failed at {}\n  expect!(value).{}\n\n  Expected: {:?}\n  Received: {:?}\n",
            self.location, matcher, expected, received
        )
    }
}

impl<T: Debug + PartialEq> Expect<T> {
    pub fn to_equal(&self, expected: T) {
        if self.value != expected {
            self.fail("to_equal(expected)", &expected, &self.value);
        }
    }

    pub fn to_not_equal(&self, unexpected: T) {
        if self.value == unexpected {
            self.fail("to_not_equal(value)", format!("not {:?}", unexpected), &self.value);
        }
    }
}

impl Expect<bool> {
    pub fn to_be_true(&self) {
        if !self.value {
            self.fail("to_be_true()", true, false);
        }
    }

    pub fn to_be_false(&self) {
        if self.value {
            self.fail("to_be_false()", false, true);
        }
    }
}

impl<T: Debug> Expect<Option<T>> {
    pub fn to_be_some(&self) {
        if self.value.is_none() {
            self.fail("to_be_some()", "Some(_)", "None");
        }
    }

    pub fn to_be_none(&self) {
        if self.value.is_some() {
            self.fail("to_be_none()", "None", &self.value);
        }
    }
}

impl<T: Debug, E: Debug> Expect<Result<T, E>> {
    pub fn to_be_ok(&self) {
        if self.value.is_err() {
            self.fail("to_be_ok()", "Ok(_)", &self.value);
        }
    }

    pub fn to_be_err(&self) {
        if self.value.is_ok() {
            self.fail("to_be_err()", "Err(_)", &self.value);
        }
    }
}

impl<S: AsRef<str> + Debug> Expect<S> {
    pub fn to_contain(&self, substring: &str) {
        if !self.value.as_ref().contains(substring) {
            self.fail("to_contain(substring)", format!("contains {:?}", substring), &self.value);
        }
    }

    pub fn to_not_contain(&self, substring: &str) {
        if self.value.as_ref().contains(substring) {
            self.fail(
                "to_not_contain(substring)",
                format!("does not contain {:?}", substring),
                &self.value,
            );
        }
    }
}

impl<T: Debug> Expect<Vec<T>> {
    pub fn to_have_length(&self, expected: usize) {
        if self.value.len() != expected {
            self.fail(
                "to_have_length(n)",
                format!("length {}", expected),
                format!("length {}: {:?}", self.value.len(), self.value),
            );
        }
    }

    pub fn to_be_empty(&self) {
        if !self.value.is_empty() {
            self.fail("to_be_empty()", "[]", &self.value);
        }
    }
}

/// Wrap a value for fluent assertions
///
/// ```rust,ignore
/// expect!(todos).to_have_length(1);
/// expect!(page.body_text()).to_contain("Buy milk");
/// ```
#[macro_export]
macro_rules! expect {
    ($value:expr) => {
        $crate::testing::Expect::new($value, concat!(file!(), ":", line!()))
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_passing_matchers() {
        crate::expect!(2 + 2).to_equal(4);
        crate::expect!(true).to_be_true();
        crate::expect!(Some(1)).to_be_some();
        crate::expect!(Ok::<_, ()>(1)).to_be_ok();
        crate::expect!("hello world").to_contain("world");
        crate::expect!(vec![1, 2]).to_have_length(2);
    }

    #[test]
    #[should_panic(expected = "Expected: 5")]
    fn test_failure_reports_expected_value() {
        crate::expect!(4).to_equal(5);
    }
}
