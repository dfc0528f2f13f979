use super::TransformError;

/// Extract the year from a registry event date.
///
/// Registry dates read "June 2016"; the year is the last whitespace-separated
/// token, which also covers "June 4 2016" style strings.
pub fn event_year(date: &str) -> Result<i32, TransformError> {
    date.split_whitespace()
        .last()
        .and_then(|token| token.parse::<i32>().ok())
        .ok_or_else(|| TransformError::MalformedDate {
            date: date.to_string(),
        })
}
