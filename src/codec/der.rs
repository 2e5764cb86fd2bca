// Copyright 2023 Fondazione LINKS

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

//     http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The DER subset used inside key envelopes: a `SEQUENCE` holding exactly one
//! `INTEGER` (private keys) or one `OCTET STRING` (public keys), with definite
//! minimal lengths.

use crate::errors::Error;

const TAG_INTEGER: u8 = 0x02;
const TAG_OCTET_STRING: u8 = 0x04;
const TAG_SEQUENCE: u8 = 0x30;

/// Long form lengths are accepted up to this many length octets
const MAX_LENGTH_OCTETS: usize = 4;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Field {
    Integer,
    OctetString,
}

impl Field {
    const fn tag(&self) -> u8 {
        match self {
            Self::Integer => TAG_INTEGER,
            Self::OctetString => TAG_OCTET_STRING,
        }
    }

    const fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::OctetString => "OCTET STRING",
        }
    }
}

fn format_error(msg: &str) -> Error {
    Error::FormatError(msg.to_owned())
}

fn push_length(len: usize, out: &mut Vec<u8>) {
    if len < 0x80 {
        out.push(len as u8);
        return;
    }
    let bytes = len.to_be_bytes();
    let skip = bytes.iter().take_while(|&&b| b == 0).count();
    out.push(0x80 | (bytes.len() - skip) as u8);
    out.extend_from_slice(&bytes[skip..]);
}

fn push_tlv(tag: u8, value: &[u8], out: &mut Vec<u8>) {
    out.push(tag);
    push_length(value.len(), out);
    out.extend_from_slice(value);
}

/// `SEQUENCE { field }`
pub fn encode_single_field(field: Field, value: &[u8]) -> Vec<u8> {
    let mut inner = Vec::with_capacity(value.len() + 6);
    push_tlv(field.tag(), value, &mut inner);
    let mut out = Vec::with_capacity(inner.len() + 6);
    push_tlv(TAG_SEQUENCE, &inner, &mut out);
    out
}

/// Content octets of a non-negative INTEGER given its big-endian magnitude.
pub fn unsigned_integer_content(magnitude_be: &[u8]) -> Vec<u8> {
    let skip = magnitude_be.iter().take_while(|&&b| b == 0).count();
    let magnitude = &magnitude_be[skip..];
    match magnitude.first() {
        None => vec![0x00],
        Some(&b) if b & 0x80 != 0 => [&[0x00u8][..], magnitude].concat(),
        Some(_) => magnitude.to_vec(),
    }
}

/// Big-endian magnitude of INTEGER content octets. Zero maps to an empty slice.
///
/// Non-minimal encodings are a [`Error::FormatError`], negative values a [`Error::PointError`].
pub fn unsigned_integer_magnitude(content: &[u8]) -> Result<&[u8], Error> {
    match content {
        [] => Err(format_error("empty INTEGER")),
        [0x00, next, ..] if next & 0x80 == 0 => Err(format_error("non-minimal INTEGER")),
        [0xff, next, ..] if next & 0x80 != 0 => Err(format_error("non-minimal INTEGER")),
        [first, ..] if first & 0x80 != 0 => {
            Err(Error::PointError("negative private scalar".to_owned()))
        }
        [0x00, rest @ ..] => Ok(rest),
        _ => Ok(content),
    }
}

struct Reader<'a> {
    data: &'a [u8],
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn byte(&mut self) -> Result<u8, Error> {
        let (&b, rest) = self.data.split_first().ok_or_else(|| format_error("truncated DER"))?;
        self.data = rest;
        Ok(b)
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], Error> {
        if len > self.data.len() {
            return Err(format_error("DER length exceeds available data"));
        }
        let (head, rest) = self.data.split_at(len);
        self.data = rest;
        Ok(head)
    }

    fn length(&mut self) -> Result<usize, Error> {
        let first = self.byte()?;
        if first < 0x80 {
            return Ok(first as usize);
        }

        let octets = (first & 0x7f) as usize;
        if octets == 0 {
            return Err(format_error("indefinite DER length"));
        }
        if octets > MAX_LENGTH_OCTETS {
            return Err(format_error("DER length too large"));
        }

        let raw = self.take(octets)?;
        if raw[0] == 0 {
            return Err(format_error("non-minimal DER length"));
        }
        let len = raw.iter().fold(0usize, |acc, &b| (acc << 8) | b as usize);
        if len < 0x80 {
            return Err(format_error("non-minimal DER length"));
        }
        Ok(len)
    }

    fn tlv(&mut self) -> Result<(u8, &'a [u8]), Error> {
        let tag = self.byte()?;
        let len = self.length()?;
        let value = self.take(len)?;
        Ok((tag, value))
    }
}

/// Parses `SEQUENCE { field }` and returns the field's content octets.
///
/// Anything else, including trailing bytes after the sequence or a second
/// field inside it, is a [`Error::FormatError`].
pub fn decode_single_field(der: &[u8], field: Field) -> Result<&[u8], Error> {
    let mut outer = Reader::new(der);
    let (tag, content) = outer.tlv()?;
    if tag != TAG_SEQUENCE {
        return Err(format_error("expected a SEQUENCE"));
    }
    if !outer.is_empty() {
        return Err(format_error("trailing bytes after SEQUENCE"));
    }

    let mut inner = Reader::new(content);
    let (tag, value) = inner.tlv()?;
    if tag != field.tag() {
        return Err(Error::FormatError(format!("expected an {}", field.as_str())));
    }
    if !inner.is_empty() {
        return Err(format_error("SEQUENCE holds more than one field"));
    }
    Ok(value)
}
