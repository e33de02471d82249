// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

/// Formats a duration in milliseconds as `M:SS`.
///
/// Minutes are not wrapped into hours, so long recordings read `75:02`.
///
/// # Arguments
///
/// * `millis` - The duration to format.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(format_time(65_000), "1:05");
/// assert_eq!(format_time(3_600_000), "60:00");
/// ```
pub(crate) fn format_time(millis: u64) -> String {
    let minutes = millis / 60_000;
    let seconds = (millis / 1_000) % 60;
    format!("{}:{:02}", minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_padded_seconds() {
        assert_eq!(format_time(0), "0:00");
        assert_eq!(format_time(999), "0:00");
        assert_eq!(format_time(65_000), "1:05");
        assert_eq!(format_time(180_000), "3:00");
        assert_eq!(format_time(3_600_000), "60:00");
    }
}
