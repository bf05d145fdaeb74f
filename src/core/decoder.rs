use crate::domain::model::{RmcData, Sentence};
use chrono::{NaiveDate, NaiveTime};

// RMC 欄位數:基本 12,NMEA 2.3 多帶 mode,4.1 再多帶 nav status
const RMC_FIELD_RANGE: std::ops::RangeInclusive<usize> = 12..=14;

/// Decodes one line into a tagged sentence. This never fails outright:
/// whatever cannot be parsed comes back as `Unparseable` with a diagnostic,
/// so a bad record can never abort the batch it arrived in.
pub fn decode(record: &str) -> Sentence {
    let line = record.trim();
    let Some(raw_payload) = line.strip_prefix('$') else {
        return unparseable(line, "missing '$' sentinel");
    };

    let payload = match split_checksum(line, raw_payload) {
        Ok(payload) => payload,
        Err(sentence) => return sentence,
    };

    let fields: Vec<&str> = payload.split(',').collect();
    let type_code = fields[0];
    if type_code.is_empty() {
        return unparseable(line, "empty sentence type");
    }

    // Proprietary sentences ($P...) can end in "RMC" too (Garmin PGRMC);
    // they carry no navigation time.
    let is_rmc =
        !type_code.starts_with('P') && type_code.len() == 5 && type_code.ends_with("RMC");
    if !is_rmc {
        return Sentence::Other {
            type_code: type_code.to_string(),
        };
    }

    if !RMC_FIELD_RANGE.contains(&fields.len()) {
        return unparseable(
            line,
            &format!("RMC field count {} out of range", fields.len()),
        );
    }

    let time = match parse_time(fields[1]) {
        Ok(time) => time,
        Err(reason) => return unparseable(line, &reason),
    };
    let date = match parse_date(fields[9]) {
        Ok(date) => date,
        Err(reason) => return unparseable(line, &reason),
    };

    Sentence::Rmc(RmcData {
        talker: type_code[..2].to_string(),
        time,
        date,
        valid: fields[2] == "A",
    })
}

fn unparseable(line: &str, reason: &str) -> Sentence {
    Sentence::Unparseable {
        line: line.to_string(),
        reason: reason.to_string(),
    }
}

/// Validates the trailing `*hh` XOR checksum when one is present and returns
/// the payload in front of it. Receivers that omit the checksum entirely are
/// tolerated.
fn split_checksum<'a>(line: &str, payload: &'a str) -> std::result::Result<&'a str, Sentence> {
    let Some((body, given)) = payload.rsplit_once('*') else {
        return Ok(payload);
    };

    let given = given.trim();
    let expected = match u8::from_str_radix(given, 16) {
        Ok(value) if given.len() == 2 => value,
        _ => return Err(unparseable(line, "malformed checksum field")),
    };

    let computed = body.bytes().fold(0u8, |acc, byte| acc ^ byte);
    if computed != expected {
        return Err(unparseable(
            line,
            &format!("checksum mismatch (sentence says {expected:02X}, computed {computed:02X})"),
        ));
    }

    Ok(body)
}

/// `hhmmss` or `hhmmss.sss`; the fractional part is discarded. An empty
/// field means the receiver has no time yet and maps to `None`.
fn parse_time(field: &str) -> std::result::Result<Option<NaiveTime>, String> {
    if field.is_empty() {
        return Ok(None);
    }

    let whole = field.split('.').next().unwrap_or(field);
    if whole.len() != 6 || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("malformed time field '{field}'"));
    }

    NaiveTime::from_hms_opt(two_digits(&whole[0..2]), two_digits(&whole[2..4]), two_digits(&whole[4..6]))
        .map(Some)
        .ok_or_else(|| format!("time field '{field}' out of range"))
}

/// `ddmmyy`. Two-digit years pivot strptime-style: 00-68 land in the 2000s,
/// 69-99 in the 1900s.
fn parse_date(field: &str) -> std::result::Result<Option<NaiveDate>, String> {
    if field.is_empty() {
        return Ok(None);
    }

    if field.len() != 6 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("malformed date field '{field}'"));
    }

    let day = two_digits(&field[0..2]);
    let month = two_digits(&field[2..4]);
    let yy = two_digits(&field[4..6]);
    let year = if yy <= 68 { 2000 + yy } else { 1900 + yy } as i32;

    NaiveDate::from_ymd_opt(year, month, day)
        .map(Some)
        .ok_or_else(|| format!("date field '{field}' out of range"))
}

fn two_digits(slice: &str) -> u32 {
    // callers pre-validate the digits; u32::MAX falls through to the
    // from_*_opt range check
    slice.parse().unwrap_or(u32::MAX)
}
