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

pub trait PublicKey: Send + Sync + 'static {
    type Output;
    fn to_bytes(&self) -> Self::Output;
    /// Hex of [`PublicKey::to_bytes`]
    fn encode(&self) -> String;
}

pub trait PrivateKey: Send + Sync + 'static {
    type Output;
    //in BE order
    fn to_bytes(&self) -> Self::Output;
    fn encode(&self) -> String;
}
