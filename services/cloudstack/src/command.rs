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

use cloudstack_core::Error;
use std::fmt;
use std::str::FromStr;

/// Commands with a dedicated method on [`Client`](crate::Client).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    ListConfigurations,
    ListDomains,
    ListDomainChildren,
    ListZones,
    ListPods,
    ListClusters,
    ListHosts,
    ListSystemVms,
    ListRouters,
    ListVirtualMachines,
    ListCapacity,
    ListAlerts,
    ListEvents,
}

impl Command {
    /// All known commands.
    pub const ALL: [Command; 13] = [
        Command::ListConfigurations,
        Command::ListDomains,
        Command::ListDomainChildren,
        Command::ListZones,
        Command::ListPods,
        Command::ListClusters,
        Command::ListHosts,
        Command::ListSystemVms,
        Command::ListRouters,
        Command::ListVirtualMachines,
        Command::ListCapacity,
        Command::ListAlerts,
        Command::ListEvents,
    ];

    /// Wire name of the command.
    pub fn as_str(self) -> &'static str {
        match self {
            Command::ListConfigurations => "listConfigurations",
            Command::ListDomains => "listDomains",
            Command::ListDomainChildren => "listDomainChildren",
            Command::ListZones => "listZones",
            Command::ListPods => "listPods",
            Command::ListClusters => "listClusters",
            Command::ListHosts => "listHosts",
            Command::ListSystemVms => "listSystemVms",
            Command::ListRouters => "listRouters",
            Command::ListVirtualMachines => "listVirtualMachines",
            Command::ListCapacity => "listCapacity",
            Command::ListAlerts => "listAlerts",
            Command::ListEvents => "listEvents",
        }
    }

    /// Whether the command is paginated server side.
    pub fn is_list(self) -> bool {
        is_list_command(self.as_str())
    }

    /// Key of the envelope wrapping this command's response.
    pub fn response_key(self) -> String {
        response_key(self.as_str())
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::request_invalid(format!("unknown command: {s}")))
    }
}

/// A command is a list command iff its name starts with `list`.
pub fn is_list_command(command: &str) -> bool {
    command.starts_with("list")
}

/// `listHosts` => `listhostsresponse`
pub fn response_key(command: &str) -> String {
    format!("{}response", command.to_lowercase())
}
