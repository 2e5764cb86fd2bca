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

use core::fmt;

use crate::errors::Error;

const BEGIN: &str = "-----BEGIN ";
const END: &str = "-----END ";
const DASHES: &str = "-----";
const LINE_WIDTH: usize = 64;

/// Kind of content carried by an [`Envelope`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Label {
    PrivateKey,
    PublicKey,
}

impl Label {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PrivateKey => "PRIVATE KEY",
            Self::PublicKey => "PUBLIC KEY",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Labeled binary payload, armored as base64 between `BEGIN`/`END` markers.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Envelope {
    pub label: Label,
    pub payload: Vec<u8>,
}

impl Envelope {
    pub fn new(label: Label, payload: Vec<u8>) -> Self {
        Self { label, payload }
    }

    pub fn armor(&self) -> String {
        let encoded = base64::encode(&self.payload);
        let mut out = String::with_capacity(encoded.len() + encoded.len() / LINE_WIDTH + 64);

        out.push_str(&format!("{BEGIN}{}{DASHES}\n", self.label));
        let mut rest = encoded.as_str();
        while !rest.is_empty() {
            let (line, tail) = rest.split_at(rest.len().min(LINE_WIDTH));
            out.push_str(line);
            out.push('\n');
            rest = tail;
        }
        out.push_str(&format!("{END}{}{DASHES}\n", self.label));
        out
    }

    /// Parses one armored envelope whose label must be `expected`.
    ///
    /// Surrounding whitespace is ignored; any other text before the begin
    /// marker or after the end marker is rejected.
    pub fn parse(data: &[u8], expected: Label) -> Result<Self, Error> {
        let text = core::str::from_utf8(data)
            .map_err(|_| Error::FormatError("envelope is not UTF-8".to_owned()))?
            .trim();

        let after_begin = text
            .strip_prefix(BEGIN)
            .ok_or_else(|| Error::FormatError("missing begin marker".to_owned()))?;
        let (label, rest) = after_begin
            .split_once(DASHES)
            .ok_or_else(|| Error::FormatError("unterminated begin marker".to_owned()))?;

        if label != expected.as_str() {
            return Err(Error::FormatError(format!(
                "expected a {} envelope, found {:?}",
                expected, label
            )));
        }

        let end_marker = format!("{END}{label}{DASHES}");
        let body = rest
            .strip_suffix(end_marker.as_str())
            .ok_or_else(|| Error::FormatError(format!("missing {} end marker", expected)))?;

        let body: String = body.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        let payload = base64::decode(body)
            .map_err(|e| Error::FormatError(format!("invalid base64 body: {}", e)))?;

        Ok(Self::new(expected, payload))
    }
}
