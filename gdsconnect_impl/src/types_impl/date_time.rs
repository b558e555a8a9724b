use crate::{FbError, FbResult};

const MJD_OFFSET: i32 = 1_721_119 - 2_400_001;
const TIME_UNITS_PER_SECOND: u32 = 10_000;
const TIME_UNITS_PER_DAY: u32 = 86_400 * TIME_UNITS_PER_SECOND;

// Days since 1858-11-17, with the server's integer arithmetic.
fn encode_date(year: i32, month: i32, day: i32) -> i32 {
    let (mut year, mut month) = (year, month);
    if month > 2 {
        month -= 3;
    } else {
        month += 9;
        year -= 1;
    }
    let century = year / 100;
    let year_of_century = year - 100 * century;
    (146_097 * century) / 4 + (1461 * year_of_century) / 4 + (153 * month + 2) / 5 + day
        + MJD_OFFSET
}

fn decode_date(raw: i32) -> (i32, i32, i32) {
    let mut sql_date = raw - MJD_OFFSET;
    let century = (4 * sql_date - 1) / 146_097;
    sql_date = 4 * sql_date - 1 - 146_097 * century;
    let mut day = sql_date / 4;

    sql_date = (4 * day + 3) / 1461;
    day = 4 * day + 3 - 1461 * sql_date;
    day = (day + 4) / 4;

    let mut month = (5 * day - 3) / 153;
    day = 5 * day - 3 - 153 * month;
    day = (day + 5) / 5;

    let mut year = 100 * century + sql_date;
    if month < 10 {
        month += 3;
    } else {
        month -= 9;
        year += 1;
    }
    (year, month, day)
}

/// A date as it is transported on the wire: days since 1858-11-17.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize)]
pub struct FbDate(i32);

impl FbDate {
    /// Creates a date from its wire value.
    pub fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Creates a date from its calendar elements; the elements are not validated.
    pub fn from_ymd(year: i32, month: u8, day: u8) -> Self {
        Self(encode_date(year, i32::from(month), i32::from(day)))
    }

    /// The wire value.
    pub fn raw(self) -> i32 {
        self.0
    }

    /// Converts into a tuple of year, month and day.
    #[allow(clippy::cast_possible_truncation)]
    #[allow(clippy::cast_sign_loss)]
    pub fn as_ymd(self) -> (i32, u8, u8) {
        let (y, m, d) = decode_date(self.0);
        (y, m as u8, d as u8)
    }

    /// Converts into a `time::Date`.
    ///
    /// # Errors
    ///
    /// `FbError::UsageDetailed` if the date is outside the range of `time::Date`.
    pub fn to_date(self) -> FbResult<time::Date> {
        let (y, m, d) = self.as_ymd();
        let month = time::Month::try_from(m).map_err(|e| usage_err!("invalid month: {e}"))?;
        time::Date::from_calendar_date(y, month, d).map_err(|e| usage_err!("invalid date: {e}"))
    }
}

impl From<time::Date> for FbDate {
    fn from(date: time::Date) -> Self {
        Self::from_ymd(date.year(), u8::from(date.month()), date.day())
    }
}

impl std::fmt::Display for FbDate {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let (year, month, day) = self.as_ymd();
        write!(f, "{year:04}-{month:02}-{day:02}")
    }
}

/// A time of day as it is transported on the wire:
/// ten-thousandths of a second since midnight.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize)]
pub struct FbTime(u32);

impl FbTime {
    /// Creates a time from its wire value.
    ///
    /// # Errors
    ///
    /// `FbError::ImplDetailed` if the value is negative or not smaller than one day;
    /// the server never sends such a value.
    pub fn from_raw(raw: i32) -> FbResult<Self> {
        u32::try_from(raw)
            .ok()
            .filter(|r| *r < TIME_UNITS_PER_DAY)
            .map(Self)
            .ok_or_else(|| impl_err!("time value {raw} is out of range"))
    }

    /// Creates a time from hours, minutes, seconds, and ten-thousandths of a second.
    ///
    /// # Errors
    ///
    /// `FbError::Usage` if an element is out of range.
    pub fn from_hms_fraction(hour: u8, minute: u8, second: u8, fraction: u16) -> FbResult<Self> {
        if hour > 23 || minute > 59 || second > 59 || u32::from(fraction) >= TIME_UNITS_PER_SECOND
        {
            return Err(FbError::Usage("time element out of range"));
        }
        Ok(Self(
            (u32::from(hour) * 3600 + u32::from(minute) * 60 + u32::from(second))
                * TIME_UNITS_PER_SECOND
                + u32::from(fraction),
        ))
    }

    /// The wire value.
    #[allow(clippy::cast_possible_wrap)]
    pub fn raw(self) -> i32 {
        self.0 as i32
    }

    /// Converts into hours, minutes, seconds, and ten-thousandths of a second.
    #[allow(clippy::cast_possible_truncation)]
    pub fn as_hms_fraction(self) -> (u8, u8, u8, u16) {
        let fraction = (self.0 % TIME_UNITS_PER_SECOND) as u16;
        let seconds = self.0 / TIME_UNITS_PER_SECOND;
        (
            (seconds / 3600) as u8,
            (seconds / 60 % 60) as u8,
            (seconds % 60) as u8,
            fraction,
        )
    }

    /// Converts into a `time::Time`.
    ///
    /// # Errors
    ///
    /// Never in practice, since the value range is checked on construction.
    pub fn to_time(self) -> FbResult<time::Time> {
        let (h, m, s, fraction) = self.as_hms_fraction();
        time::Time::from_hms_micro(h, m, s, u32::from(fraction) * 100)
            .map_err(|e| usage_err!("invalid time: {e}"))
    }
}

impl From<time::Time> for FbTime {
    #[allow(clippy::cast_possible_truncation)]
    fn from(t: time::Time) -> Self {
        let seconds = u32::from(t.hour()) * 3600 + u32::from(t.minute()) * 60 + u32::from(t.second());
        Self(seconds * TIME_UNITS_PER_SECOND + t.microsecond() / 100)
    }
}

impl std::fmt::Display for FbTime {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let (h, m, s, fraction) = self.as_hms_fraction();
        write!(f, "{h:02}:{m:02}:{s:02}.{fraction:04}")
    }
}

/// A timestamp as it is transported on the wire: a date and a time.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize)]
pub struct FbTimestamp {
    date: FbDate,
    time: FbTime,
}

impl FbTimestamp {
    /// Combines date and time.
    pub fn new(date: FbDate, time: FbTime) -> Self {
        Self { date, time }
    }

    /// The date part.
    pub fn date(self) -> FbDate {
        self.date
    }

    /// The time part.
    pub fn time(self) -> FbTime {
        self.time
    }

    /// Converts into a `time::PrimitiveDateTime`.
    ///
    /// # Errors
    ///
    /// `FbError::UsageDetailed` if the date is outside the range of `time::Date`.
    pub fn to_primitive_date_time(self) -> FbResult<time::PrimitiveDateTime> {
        Ok(time::PrimitiveDateTime::new(
            self.date.to_date()?,
            self.time.to_time()?,
        ))
    }
}

impl From<time::PrimitiveDateTime> for FbTimestamp {
    fn from(ts: time::PrimitiveDateTime) -> Self {
        Self::new(ts.date().into(), ts.time().into())
    }
}

impl std::fmt::Display for FbTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {}", self.date, self.time)
    }
}
