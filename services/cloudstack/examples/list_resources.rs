use anyhow::Result;
use cloudstack::{capacity_type_string, Client, Command, Config, Params};
use cloudstack_core::{Context, OsEnv};
use cloudstack_http_send_reqwest::ReqwestHttpSend;
use std::env;
use std::str::FromStr;

/// Filters applied to the commands run by this example.
fn default_params(command: Command) -> Params {
    let pairs: &[(&str, &str)] = match command {
        Command::ListConfigurations => &[("name", "default.page.size")],
        Command::ListZones => &[("available", "true")],
        Command::ListHosts => &[("type", "Routing")],
        Command::ListRouters => &[("listAll", "true")],
        Command::ListVirtualMachines => &[
            ("domainid", "1"),
            ("isrecursive", "True"),
            ("state", "Running"),
            ("listAll", "true"),
        ],
        _ => &[],
    };

    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging, run with RUST_LOG=debug to see every request
    let _ = env_logger::builder().try_init();

    // Commands to run, every known list command when none is given
    let commands = env::args()
        .skip(1)
        .map(|arg| Command::from_str(&arg))
        .collect::<cloudstack_core::Result<Vec<_>>>()?;
    let commands = if commands.is_empty() {
        Command::ALL.to_vec()
    } else {
        commands
    };

    // CLOUDSTACK_URL, CLOUDSTACK_APIKEY and CLOUDSTACK_SECRETKEY must be set
    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let config = Config::default().from_env(&ctx);
    let client = Client::from_config(ctx, &config)?;

    println!("Discovering page size of {}", client.base_url());
    println!("{:?}", client.discover_page_size().await);

    // Clones share the discovered page size
    let handles: Vec<_> = commands
        .into_iter()
        .map(|command| {
            let client = client.clone();
            tokio::spawn(async move {
                let resp = client.request(command, default_params(command)).await;
                (command, resp)
            })
        })
        .collect();

    for handle in handles {
        let (command, resp) = handle.await?;
        println!("== {command}");
        match resp {
            Ok(v) if command == Command::ListCapacity => {
                let capacities = v["listcapacityresponse"]["capacity"]
                    .as_array()
                    .cloned()
                    .unwrap_or_default();
                for c in capacities {
                    let code = c["type"].as_i64().unwrap_or(-1);
                    println!(
                        "{}: {} / {}",
                        capacity_type_string(code),
                        c["capacityused"],
                        c["capacitytotal"]
                    );
                }
            }
            Ok(v) => println!("{}", serde_json::to_string_pretty(&v)?),
            Err(err) => {
                println!("failed: {err}");
                if let Some(body) = err.response_body() {
                    println!("{body}");
                }
            }
        }
    }

    Ok(())
}
