use std::env;

use cloudstack::{capacity_type_string, Client, Config, Params};
use cloudstack_core::{Context, OsEnv, Result};
use cloudstack_http_send_reqwest::ReqwestHttpSend;
use log::{debug, warn};

fn init_client() -> Option<Client> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("CLOUDSTACK_TEST").is_err() || env::var("CLOUDSTACK_TEST").unwrap() != "on" {
        return None;
    }

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let config = Config::default().from_env(&ctx);
    let client = Client::from_config(ctx, &config)
        .expect("env CLOUDSTACK_URL, CLOUDSTACK_APIKEY and CLOUDSTACK_SECRETKEY must set");

    Some(client)
}

#[tokio::test]
async fn test_discover_page_size() -> Result<()> {
    let Some(client) = init_client() else {
        warn!("CLOUDSTACK_TEST is not set, skipped");
        return Ok(());
    };

    let discovery = client.discover_page_size().await;
    debug!("page size discovery: {discovery:?}");
    assert!(discovery.page_size().is_some());
    Ok(())
}

#[tokio::test]
async fn test_list_zones() -> Result<()> {
    let Some(client) = init_client() else {
        warn!("CLOUDSTACK_TEST is not set, skipped");
        return Ok(());
    };

    let zones = client
        .list_zones(Params::from([("available".to_string(), "true".to_string())]))
        .await?;
    debug!("zones: {zones}");
    assert!(zones.get("listzonesresponse").is_some());
    Ok(())
}

#[tokio::test]
async fn test_list_capacity() -> Result<()> {
    let Some(client) = init_client() else {
        warn!("CLOUDSTACK_TEST is not set, skipped");
        return Ok(());
    };

    let resp = client.list_capacity(Params::new()).await?;
    let capacities = resp["listcapacityresponse"]["capacity"]
        .as_array()
        .cloned()
        .unwrap_or_default();
    for c in capacities {
        let code = c["type"].as_i64().unwrap_or(-1);
        debug!("capacity {}: {}", capacity_type_string(code), c["capacityused"]);
    }
    Ok(())
}

#[tokio::test]
async fn test_unknown_command_fails() -> Result<()> {
    let Some(client) = init_client() else {
        warn!("CLOUDSTACK_TEST is not set, skipped");
        return Ok(());
    };

    let err = client
        .request_command("notARealCommand", Params::new())
        .await
        .unwrap_err();
    debug!("unknown command failed as expected: {err}");
    assert!(err.response_body().is_some());
    Ok(())
}
