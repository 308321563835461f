use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Timestamp(pub OffsetDateTime);

impl Timestamp {
    pub fn now_utc() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    pub fn from(dt: OffsetDateTime) -> Self {
        Self(dt.to_offset(UtcOffset::UTC))
    }

    /// Returns the inner UTC `OffsetDateTime` without consuming the wrapper.
    pub fn as_inner(&self) -> OffsetDateTime {
        self.0
    }

    /// RFC 3339 rendering used on the wire. Empty if the value cannot be formatted.
    pub fn to_rfc3339(&self) -> String {
        self.0.format(&Rfc3339).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_now_utc_when_called_should_return_utc_offset() {
        let result = Timestamp::now_utc();
        assert_eq!(result.as_inner().offset(), UtcOffset::UTC);
    }

    #[test]
    fn given_from_with_non_utc_offset_when_called_should_keep_instant_in_utc() {
        let offset = UtcOffset::from_hms(-5, 0, 0).expect("valid offset");
        let dt = OffsetDateTime::now_utc().to_offset(offset);

        let result = Timestamp::from(dt);

        assert_eq!(result.as_inner().offset(), UtcOffset::UTC);
        assert_eq!(result.as_inner().unix_timestamp(), dt.unix_timestamp());
    }

    #[test]
    fn given_earlier_timestamp_when_compared_should_order_first() {
        let earlier = Timestamp::from(OffsetDateTime::UNIX_EPOCH);
        let later = Timestamp::now_utc();
        assert!(earlier < later);
    }

    #[test]
    fn given_epoch_when_to_rfc3339_should_render_utc_suffix() {
        let ts = Timestamp::from(OffsetDateTime::UNIX_EPOCH);
        assert_eq!(ts.to_rfc3339(), "1970-01-01T00:00:00Z");
    }
}
