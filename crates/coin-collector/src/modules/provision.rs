//! RDS 인스턴스 준비 모듈.
//!
//! 인스턴스 존재 여부 판단은 조회 결과의 **첫 번째** 인스턴스만 봅니다.
//! - 인스턴스가 하나도 없으면 생성
//! - 첫 번째 인스턴스 식별자가 대상과 같으면 이미 존재
//! - 그 외에는 생성 (뒤쪽에 같은 식별자가 있어도 생성 요청을 보냄)
//!
//! 계정에 인스턴스가 하나뿐이라는 가정에 기댄 동작이며, 여러 인스턴스가 있는 계정에서는
//! 존재 여부를 잘못 판단할 수 있습니다.
//!
//! 생성 요청 후에는 상태를 폴링하지 않고 고정 시간([`FixedWait`]) 동안 블로킹합니다.
//! 대기 후 인스턴스가 실제로 available 상태인지 확인하지 않는 것은 알려진 제약입니다.

use crate::error::{CollectorError, Result};
use async_trait::async_trait;
use aws_sdk_rds::error::DisplayErrorContext;
use coin_core::{
    AwsCredentials, CreateInstanceRequest, DatabaseInstanceDescriptor, InstanceEndpoint,
};
use secrecy::ExposeSecret;
use std::time::Duration;

/// Provider 경계 에러.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 클라우드 DB 인스턴스 API.
#[async_trait]
pub trait RdsApi: Send + Sync {
    /// 계정의 인스턴스 목록 (provider가 돌려준 순서 그대로).
    async fn describe_instances(
        &self,
    ) -> std::result::Result<Vec<DatabaseInstanceDescriptor>, BoxError>;

    /// 인스턴스 생성 요청.
    async fn create_instance(
        &self,
        request: &CreateInstanceRequest,
    ) -> std::result::Result<(), BoxError>;
}

/// 인스턴스 준비 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// 이미 존재 (생성 요청 없음)
    AlreadyExists,
    /// 생성 요청 후 고정 대기 완료
    Created,
}

/// 생성 후 고정 대기.
///
/// 인스턴스 상태를 확인하지 않고 정해진 시간만큼 잠드는 방식입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedWait(pub Duration);

impl FixedWait {
    pub async fn wait(&self) {
        tokio::time::sleep(self.0).await;
    }
}

/// 생성이 필요한지 판단합니다 (첫 번째 인스턴스만 비교).
pub fn needs_creation(instances: &[DatabaseInstanceDescriptor], identifier: &str) -> bool {
    match instances.first() {
        None => true,
        Some(first) => first.identifier != identifier,
    }
}

/// 대상 인스턴스가 없으면 생성하고 고정 시간 대기합니다.
pub async fn ensure_instance<R>(
    api: &R,
    request: &CreateInstanceRequest,
    wait: FixedWait,
) -> Result<ProvisionOutcome>
where
    R: RdsApi + ?Sized,
{
    let instances = api
        .describe_instances()
        .await
        .map_err(|e| CollectorError::Provision(format!("describe instances failed: {}", e)))?;

    tracing::debug!(
        instances = instances.len(),
        first = instances.first().map(|i| i.identifier.as_str()),
        wanted = %request.identifier,
        "인스턴스 목록 조회"
    );

    if !needs_creation(&instances, &request.identifier) {
        tracing::info!(identifier = %request.identifier, "인스턴스가 이미 존재합니다");
        return Ok(ProvisionOutcome::AlreadyExists);
    }

    api.create_instance(request)
        .await
        .map_err(|e| CollectorError::Provision(format!("create instance failed: {}", e)))?;

    tracing::info!(
        identifier = %request.identifier,
        instance_class = %request.instance_class,
        engine = %request.engine,
        wait_secs = wait.0.as_secs(),
        "데이터베이스 생성 중. 몇 분 정도 걸립니다..."
    );
    wait.wait().await;

    Ok(ProvisionOutcome::Created)
}

/// 적재 대상 인스턴스의 엔드포인트를 조회합니다.
///
/// 준비 단계와 같은 규칙으로 첫 번째 인스턴스를 사용합니다.
pub async fn resolve_endpoint<R>(
    api: &R,
    identifier: &str,
) -> Result<(DatabaseInstanceDescriptor, InstanceEndpoint)>
where
    R: RdsApi + ?Sized,
{
    let instances = api
        .describe_instances()
        .await
        .map_err(|e| CollectorError::Provision(format!("describe instances failed: {}", e)))?;

    let first = instances
        .into_iter()
        .next()
        .ok_or_else(|| CollectorError::Provision("no database instance found".to_string()))?;

    if first.identifier != identifier {
        tracing::warn!(
            first = %first.identifier,
            wanted = identifier,
            "첫 번째 인스턴스가 대상과 다릅니다. 첫 번째 인스턴스로 적재합니다"
        );
    }

    let endpoint = first.endpoint.clone().ok_or_else(|| {
        CollectorError::Provision(format!(
            "instance `{}` has no endpoint yet (status: {})",
            first.identifier,
            first.status.as_deref().unwrap_or("unknown")
        ))
    })?;

    tracing::info!(identifier = %first.identifier, endpoint = %endpoint, "엔드포인트 확인");
    Ok((first, endpoint))
}

// ==================== AWS RDS ====================

/// aws-sdk-rds 기반 [`RdsApi`] 구현.
#[derive(Clone)]
pub struct AwsRdsClient {
    client: aws_sdk_rds::Client,
}

impl AwsRdsClient {
    /// 설정 파일의 정적 자격증명으로 클라이언트 생성.
    pub async fn from_credentials(credentials: &AwsCredentials) -> Self {
        let provider = aws_sdk_rds::config::Credentials::new(
            credentials.access_key.clone(),
            credentials.secret_key.expose_secret().to_string(),
            None,
            None,
            "coin-collector-config",
        );

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .credentials_provider(provider);
        if let Some(region) = &credentials.region {
            loader = loader.region(aws_sdk_rds::config::Region::new(region.clone()));
        }

        let sdk_config = loader.load().await;
        Self {
            client: aws_sdk_rds::Client::new(&sdk_config),
        }
    }
}

#[async_trait]
impl RdsApi for AwsRdsClient {
    async fn describe_instances(
        &self,
    ) -> std::result::Result<Vec<DatabaseInstanceDescriptor>, BoxError> {
        let output = self
            .client
            .describe_db_instances()
            .send()
            .await
            .map_err(|e| DisplayErrorContext(e).to_string())?;

        let instances = output
            .db_instances()
            .iter()
            .map(|instance| DatabaseInstanceDescriptor {
                identifier: instance
                    .db_instance_identifier()
                    .unwrap_or_default()
                    .to_string(),
                endpoint: instance.endpoint().and_then(|endpoint| {
                    Some(InstanceEndpoint {
                        host: endpoint.address()?.to_string(),
                        port: u16::try_from(endpoint.port()?).ok()?,
                    })
                }),
                master_username: instance.master_username().map(str::to_string),
                engine: instance.engine().map(str::to_string),
                status: instance.db_instance_status().map(str::to_string),
            })
            .collect();

        Ok(instances)
    }

    async fn create_instance(
        &self,
        request: &CreateInstanceRequest,
    ) -> std::result::Result<(), BoxError> {
        self.client
            .create_db_instance()
            .allocated_storage(request.allocated_storage)
            .db_instance_class(&request.instance_class)
            .db_name(&request.db_name)
            .db_instance_identifier(&request.identifier)
            .engine(&request.engine)
            .master_username(&request.master_username)
            .master_user_password(request.master_password.expose_secret())
            .vpc_security_group_ids(&request.vpc_security_group_id)
            .send()
            .await
            .map_err(|e| DisplayErrorContext(e).to_string())?;

        Ok(())
    }
}
