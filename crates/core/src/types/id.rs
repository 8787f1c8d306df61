//! Integer IDs for stored entities.
//!
//! Each entity gets its own newtype so an intake ID cannot be passed where an
//! admin ID is expected. Database rows carry plain `i32` columns and are
//! wrapped when converted into domain types.

/// Define an `i32` newtype ID with serde transparency and `Display`.
///
/// ```rust
/// # use deposit_core::define_id;
/// define_id!(ShelfId);
///
/// let shelf = ShelfId::new(4);
/// assert_eq!(shelf.as_i32(), 4);
/// assert_eq!(shelf.to_string(), "4");
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

define_id!(IntakeId);
define_id!(AdminUserId);
