// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Calendar date helpers.

use chrono::{Local, NaiveDate};

/// Today's date in the server's local time zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
