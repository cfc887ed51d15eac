//! Text rendering for error codes.
//!
//! [`Stringify`] is how an [`Exception`](crate::Exception) turns its code
//! into the prefix of its `Display` output. Only a small set of
//! primitive-like kinds render to something meaningful; any other type can
//! opt in with an empty `impl`, in which case it renders as `""`.

/// Converts a value into the text used in composite error messages.
pub trait Stringify {
    /// Render `self` as text. The default renders nothing.
    fn stringify(&self) -> String {
        String::new()
    }
}

/// Free-function form of [`Stringify::stringify`].
pub fn stringify<T: Stringify + ?Sized>(value: &T) -> String {
    value.stringify()
}

impl<T: Stringify + ?Sized> Stringify for &T {
    fn stringify(&self) -> String {
        (**self).stringify()
    }
}

impl Stringify for str {
    fn stringify(&self) -> String {
        self.to_string()
    }
}

impl Stringify for String {
    fn stringify(&self) -> String {
        self.clone()
    }
}

macro_rules! stringify_integer {
    ($($ty:ty),*) => {
        $(
            impl Stringify for $ty {
                fn stringify(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

stringify_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Stringify for f64 {
    fn stringify(&self) -> String {
        // `Display` for floats is shortest round-trip and never uses an exponent.
        if self.is_infinite() {
            let sign = if self.is_sign_positive() { "+" } else { "-" };
            format!("{sign}Inf")
        } else {
            self.to_string()
        }
    }
}

impl Stringify for f32 {
    fn stringify(&self) -> String {
        if self.is_infinite() {
            let sign = if self.is_sign_positive() { "+" } else { "-" };
            format!("{sign}Inf")
        } else {
            self.to_string()
        }
    }
}

impl Stringify for bool {
    fn stringify(&self) -> String {
        self.to_string()
    }
}

impl Stringify for char {
    fn stringify(&self) -> String {
        self.to_string()
    }
}

impl Stringify for [u8] {
    fn stringify(&self) -> String {
        String::from_utf8_lossy(self).into_owned()
    }
}

impl Stringify for Vec<u8> {
    fn stringify(&self) -> String {
        self.as_slice().stringify()
    }
}

impl Stringify for [String] {
    fn stringify(&self) -> String {
        self.concat()
    }
}

impl Stringify for Vec<String> {
    fn stringify(&self) -> String {
        self.as_slice().stringify()
    }
}
