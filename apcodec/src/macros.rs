/// newtype around a string that passed one of the lexical checks in the `xsd` crate
macro_rules! lexical {
	( $( $(#[$meta:meta])* pub struct $name:ident => $check:path, $err:path; )+ ) => {
		$(
			$(#[$meta])*
			#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
			pub struct $name(String);

			impl $name {
				pub fn parse(value: &str) -> Result<Self, xsd::XsdError> {
					if $check(value) {
						Ok(Self(value.to_string()))
					} else {
						Err($err(value.to_string()))
					}
				}

				pub fn as_str(&self) -> &str {
					&self.0
				}

				pub fn into_string(self) -> String {
					self.0
				}
			}

			impl AsRef<str> for $name {
				fn as_ref(&self) -> &str {
					&self.0
				}
			}

			impl std::fmt::Display for $name {
				fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
					f.write_str(&self.0)
				}
			}

			impl std::str::FromStr for $name {
				type Err = xsd::XsdError;

				fn from_str(s: &str) -> Result<Self, Self::Err> {
					Self::parse(s)
				}
			}

			impl TryFrom<&str> for $name {
				type Error = xsd::XsdError;

				fn try_from(value: &str) -> Result<Self, Self::Error> {
					Self::parse(value)
				}
			}
		)+
	};
}

pub(crate) use lexical;

/// read accessor for a vocabulary property: plain form returns every value, the `->` form
/// picks the first value of the given scalar kind
#[allow(unused_macros)]
macro_rules! getter {
	($name:ident) => {
		pub fn $name(&self) -> &[$crate::Node] {
			self.get(stringify!($name))
		}
	};

	($name:ident::$rename:ident) => {
		pub fn $name(&self) -> &[$crate::Node] {
			self.get(stringify!($rename))
		}
	};

	($name:ident -> $conv:ident $t:ty) => {
		pub fn $name(&self) -> $crate::Field<$t> {
			self.first(stringify!($name))
				.and_then(|x| x.$conv())
				.ok_or($crate::MissingField(stringify!($name)))
		}
	};

	($name:ident::$rename:ident -> $conv:ident $t:ty) => {
		pub fn $name(&self) -> $crate::Field<$t> {
			self.first(stringify!($rename))
				.and_then(|x| x.$conv())
				.ok_or($crate::MissingField(stringify!($rename)))
		}
	};
}

#[allow(unused_imports)]
pub(crate) use getter;

/// builder accessors for a vocabulary property: `set_x` replaces, `add_x` appends. the
/// `single` form only generates `set_x`, for functional properties
#[allow(unused_macros)]
macro_rules! setter {
	(single $name:ident) => {
		paste::item! {
			pub fn [< set_ $name >](self, val: impl Into<$crate::Node>) -> Self {
				self.with(stringify!($name), val)
			}
		}
	};

	(single $name:ident::$rename:ident) => {
		paste::item! {
			pub fn [< set_ $name >](self, val: impl Into<$crate::Node>) -> Self {
				self.with(stringify!($rename), val)
			}
		}
	};

	($name:ident) => {
		paste::item! {
			pub fn [< set_ $name >](self, val: impl Into<$crate::Node>) -> Self {
				self.with(stringify!($name), val)
			}

			pub fn [< add_ $name >](self, val: impl Into<$crate::Node>) -> Self {
				self.with_appended(stringify!($name), val)
			}
		}
	};

	($name:ident::$rename:ident) => {
		paste::item! {
			pub fn [< set_ $name >](self, val: impl Into<$crate::Node>) -> Self {
				self.with(stringify!($rename), val)
			}

			pub fn [< add_ $name >](self, val: impl Into<$crate::Node>) -> Self {
				self.with_appended(stringify!($rename), val)
			}
		}
	};
}

#[allow(unused_imports)]
pub(crate) use setter;
