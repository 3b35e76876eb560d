//! S3驱动配置

use crate::config::{Credentials, StorageConfig};

/// S3配置
#[derive(Clone)]
pub struct S3Config {
    /// S3端点地址
    /// AWS (empty): https://s3.{region}.amazonaws.com
    /// MinIO: http://localhost:9000
    pub endpoint: String,
    /// 区域
    pub region: String,
    /// Access Key ID
    pub access_key_id: String,
    /// Secret Access Key
    pub secret_access_key: String,
    /// Session Token（用于临时凭证）
    pub session_token: Option<String>,
    /// 强制使用路径风格（而非虚拟主机风格）
    pub force_path_style: bool,
}

impl S3Config {
    pub fn new(credentials: &Credentials, storage: &StorageConfig) -> Self {
        Self {
            endpoint: storage.endpoint.trim_end_matches('/').to_string(),
            region: credentials.region.clone(),
            access_key_id: credentials.access_key.clone(),
            secret_access_key: credentials.secret_key.clone(),
            session_token: credentials.session_token.clone(),
            force_path_style: storage.force_path_style,
        }
    }

    /// Endpoint URL for `region`.
    pub fn endpoint_for(&self, region: &str) -> String {
        if self.endpoint.is_empty() {
            format!("https://s3.{}.amazonaws.com", region)
        } else {
            self.endpoint.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials {
            access_key: "AKIAEXAMPLE".to_string(),
            secret_key: "secret".to_string(),
            region: "eu-west-1".to_string(),
            session_token: None,
        }
    }

    #[test]
    fn test_aws_endpoint() {
        let config = S3Config::new(&credentials(), &StorageConfig::default());
        assert_eq!(config.endpoint_for("eu-west-1"), "https://s3.eu-west-1.amazonaws.com");
        assert!(!config.force_path_style);
    }

    #[test]
    fn test_custom_endpoint() {
        let storage = StorageConfig {
            endpoint: "http://localhost:9000/".to_string(),
            force_path_style: true,
        };
        let config = S3Config::new(&credentials(), &storage);
        assert_eq!(config.endpoint_for("eu-west-1"), "http://localhost:9000");
        assert!(config.force_path_style);
    }
}
