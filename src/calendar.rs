//! Applying a [`Tenor`] to `chrono` dates and timestamps.
//!
//! Years are applied first (as twelve months each), then months, then weeks
//! and days together as a day count. Each month step clamps to the last day of
//! the target month, so `2024-01-31 + 1m` is `2024-02-29`. Because of that
//! clamping, subtracting a tenor does not always undo adding it.

use std::ops::{Add, Sub};

use chrono::{DateTime, Days, Months, NaiveDate, NaiveDateTime, TimeZone};

use crate::tenor::Tenor;

pub trait AddTenor: Sized {
    /// `None` when the result falls outside the representable range.
    fn checked_add_tenor(self, tenor: Tenor) -> Option<Self>;

    /// Applies the same steps as [`AddTenor::checked_add_tenor`], negated and in the same order.
    fn checked_sub_tenor(self, tenor: Tenor) -> Option<Self>;
}

/// The three calendar steps of a tenor: years as months, months, and days.
fn steps(tenor: Tenor) -> Option<(Months, Months, Days)> {
    let years = Months::new(tenor.years().checked_mul(12)?);
    let months = Months::new(tenor.months());
    let days = Days::new(u64::from(tenor.weeks()) * 7 + u64::from(tenor.days()));
    Some((years, months, days))
}

macro_rules! impl_add_tenor {
    ($ty:ty $(, $generic:ident : $bound:path)?) => {
        impl$(<$generic: $bound>)? AddTenor for $ty {
            fn checked_add_tenor(self, tenor: Tenor) -> Option<Self> {
                let (years, months, days) = steps(tenor)?;
                self.checked_add_months(years)?
                    .checked_add_months(months)?
                    .checked_add_days(days)
            }

            fn checked_sub_tenor(self, tenor: Tenor) -> Option<Self> {
                let (years, months, days) = steps(tenor)?;
                self.checked_sub_months(years)?
                    .checked_sub_months(months)?
                    .checked_sub_days(days)
            }
        }

        /// # Panics
        ///
        /// Panics if the result is out of range. Use [`AddTenor::checked_add_tenor`] to avoid this.
        impl$(<$generic: $bound>)? Add<Tenor> for $ty {
            type Output = $ty;

            fn add(self, tenor: Tenor) -> $ty {
                self.checked_add_tenor(tenor)
                    .unwrap_or_else(|| panic!("adding tenor {tenor} overflowed"))
            }
        }

        /// # Panics
        ///
        /// Panics if the result is out of range. Use [`AddTenor::checked_sub_tenor`] to avoid this.
        impl$(<$generic: $bound>)? Sub<Tenor> for $ty {
            type Output = $ty;

            fn sub(self, tenor: Tenor) -> $ty {
                self.checked_sub_tenor(tenor)
                    .unwrap_or_else(|| panic!("subtracting tenor {tenor} overflowed"))
            }
        }
    };
}

impl_add_tenor!(NaiveDate);
impl_add_tenor!(NaiveDateTime);
impl_add_tenor!(DateTime<Tz>, Tz: TimeZone);

pub fn add_duration<T: AddTenor>(value: T, tenor: Tenor) -> Option<T> {
    value.checked_add_tenor(tenor)
}

pub fn subtract_duration<T: AddTenor>(value: T, tenor: Tenor) -> Option<T> {
    value.checked_sub_tenor(tenor)
}
