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

use thiserror::Error;

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The operating system entropy source could not be read. Not retried.
    #[error("Entropy source unavailable: {0}")]
    RandomnessError(String),
    #[error("Error mapping a message digest to G1")]
    HashToCurveError,
    /// A point handed to the pairing is off-curve or outside the prime-order subgroup
    #[error("Pairing input is not a valid subgroup point")]
    PairingError,
    #[error("Malformed key envelope: {0}")]
    FormatError(String),
    #[error("Invalid scalar or point: {0}")]
    PointError(String),
    #[error("Storage error: {0}")]
    IoError(String),
    #[error("Invalid store configuration: {0}")]
    ConfigError(String),
}
