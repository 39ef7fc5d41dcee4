use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::Client;

/// Build a DynamoDB client for `region`.
///
/// `endpoint_url` overrides the regional endpoint, e.g. for DynamoDB Local.
pub async fn build_client(region: &str, endpoint_url: Option<&str>) -> Client {
    let mut loader =
        aws_config::defaults(BehaviorVersion::latest()).region(Region::new(region.to_string()));

    if let Some(endpoint) = endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    let config = loader.load().await;
    Client::new(&config)
}
