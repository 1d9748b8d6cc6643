//! Status helper enums mapping to SMALLSERIAL/SMALLINT lookup tables.
//!
//! Each enum variant's discriminant matches the seed data order (1-based)
//! in the corresponding `*_statuses` database table.

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }
    };
}

define_status_enum! {
    /// Physical seat availability for booking.
    SeatStatus {
        Available = 1,
        Unavailable = 2,
    }
}

define_status_enum! {
    /// Booking lifecycle status. Active rows count against the per-seat
    /// and per-user uniqueness constraints; Cancelled is terminal.
    BookingStatus {
        Active = 1,
        Cancelled = 2,
    }
}

impl BookingStatus {
    /// Resolve a raw status id back to the enum, if known.
    pub fn from_id(id: StatusId) -> Option<Self> {
        match id {
            1 => Some(Self::Active),
            2 => Some(Self::Cancelled),
            _ => None,
        }
    }
}
