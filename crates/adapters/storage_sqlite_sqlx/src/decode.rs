//! Helpers shared by the row decoders.

use wardhub_domain::time::Timestamp;

/// Wrap any decoding failure as [`sqlx::Error::Decode`].
pub(crate) fn decode_err<E>(err: E) -> sqlx::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    sqlx::Error::Decode(Box::new(err))
}

/// Parse an RFC 3339 text column into a UTC timestamp.
pub(crate) fn parse_timestamp(value: &str) -> Result<Timestamp, sqlx::Error> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.to_utc())
        .map_err(decode_err)
}
