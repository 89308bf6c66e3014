use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;

/// Build an S3 client from the default AWS credential/region chain.
///
/// `endpoint` points the client at an S3-compatible service (MinIO,
/// LocalStack, R2); those are addressed path-style.
pub async fn build_client(endpoint: Option<&str>) -> Client {
    let config = aws_config::defaults(BehaviorVersion::latest()).load().await;

    match endpoint {
        Some(url) => {
            let s3_config = aws_sdk_s3::config::Builder::from(&config)
                .endpoint_url(url)
                .force_path_style(true)
                .build();
            Client::from_conf(s3_config)
        }
        None => Client::new(&config),
    }
}
