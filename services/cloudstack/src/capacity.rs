// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::fmt;

/// The `type` field of a `listCapacity` item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityType {
    /// Bytes.
    Memory,
    /// MHz.
    Cpu,
    /// Bytes.
    PrimaryStorageUsed,
    /// Bytes.
    PrimaryStorageAllocated,
    PublicIps,
    PrivateIps,
    /// Bytes.
    SecondaryStorage,
    Unknown,
}

impl CapacityType {
    /// Map the numeric code the server reports.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => CapacityType::Memory,
            1 => CapacityType::Cpu,
            2 => CapacityType::PrimaryStorageUsed,
            3 => CapacityType::PrimaryStorageAllocated,
            4 => CapacityType::PublicIps,
            5 => CapacityType::PrivateIps,
            6 => CapacityType::SecondaryStorage,
            _ => CapacityType::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CapacityType::Memory => "memory",
            CapacityType::Cpu => "cpu",
            CapacityType::PrimaryStorageUsed => "primary_storage_used",
            CapacityType::PrimaryStorageAllocated => "primary_storage_allocated",
            CapacityType::PublicIps => "public_ips",
            CapacityType::PrivateIps => "private_ips",
            CapacityType::SecondaryStorage => "secondary_storage",
            CapacityType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CapacityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human readable label for a capacity type code, `"unknown"` if unrecognized.
pub fn capacity_type_string(code: i64) -> &'static str {
    CapacityType::from_code(code).as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, "memory")]
    #[test_case(1, "cpu")]
    #[test_case(2, "primary_storage_used")]
    #[test_case(3, "primary_storage_allocated")]
    #[test_case(4, "public_ips")]
    #[test_case(5, "private_ips")]
    #[test_case(6, "secondary_storage")]
    #[test_case(7, "unknown")]
    #[test_case(-1, "unknown")]
    fn test_capacity_type_string(code: i64, expected: &str) {
        assert_eq!(capacity_type_string(code), expected);
    }
}
