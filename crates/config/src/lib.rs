//! 统一配置中心
//!
//! 提供应用的全局配置管理，包括：
//! - 课程注册表位置
//! - 角色名称约定
//! - 代词反应映射表
//! - 平台快照位置
//!
//! 加载顺序：默认值 -> 可选配置文件（UVAUTH_CONFIG_FILE）-> 环境变量（UVAUTH_*）

use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 指定配置文件路径的环境变量
pub const CONFIG_FILE_ENV: &str = "UVAUTH_CONFIG_FILE";

/// 环境变量前缀
pub const ENV_PREFIX: &str = "UVAUTH_";

/// 全局应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    /// 课程配置
    #[validate(nested)]
    pub courses: CoursesConfig,
    /// 角色名称配置
    #[validate(nested)]
    pub roles: RoleConfig,
    /// 代词反应配置
    #[validate(nested)]
    pub pronouns: PronounConfig,
    /// 平台配置
    #[serde(default)]
    pub platform: PlatformConfig,
}

/// 课程配置
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CoursesConfig {
    /// 课程注册表 JSON 文件路径
    #[validate(length(min = 1))]
    pub registry_path: String,
}

/// 社区中约定的角色名称
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RoleConfig {
    #[validate(length(min = 1))]
    pub unverified: String,
    #[validate(length(min = 1))]
    pub admin: String,
    #[validate(length(min = 1))]
    pub staff: String,
}

/// 单条代词映射
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PronounMapping {
    #[validate(length(min = 1))]
    pub emoji: String,
    #[validate(length(min = 1))]
    pub role: String,
}

impl PronounMapping {
    fn new(emoji: &str, role: &str) -> Self {
        Self {
            emoji: emoji.to_string(),
            role: role.to_string(),
        }
    }
}

/// 代词反应配置
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PronounConfig {
    /// 只处理该名称频道中的反应
    #[validate(length(min = 1))]
    pub channel: String,
    #[validate(length(min = 1), nested)]
    pub mappings: Vec<PronounMapping>,
}

/// 平台配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// 社区状态快照文件，用于初始化进程内平台
    #[serde(default)]
    pub snapshot_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            courses: CoursesConfig {
                registry_path: "./courses.json".to_string(),
            },
            roles: RoleConfig {
                unverified: "Unverified".to_string(),
                admin: "Admin".to_string(),
                staff: "Staff".to_string(),
            },
            pronouns: PronounConfig {
                channel: "pronouns".to_string(),
                mappings: vec![
                    PronounMapping::new("❤️", "they/them"),
                    PronounMapping::new("💛", "he/him"),
                    PronounMapping::new("💚", "any pronouns"),
                    PronounMapping::new("🧡", "she/her"),
                    PronounMapping::new("💙", "just my name"),
                    PronounMapping::new("💜", "please ask"),
                ],
            },
            platform: PlatformConfig::default(),
        }
    }
}

impl AppConfig {
    /// 按默认值 -> 配置文件 -> 环境变量的顺序加载并校验配置
    pub fn load() -> Result<Self, ConfigError> {
        let mut fig = Figment::new().merge(Serialized::defaults(AppConfig::default()));
        if let Ok(path) = std::env::var(CONFIG_FILE_ENV) {
            fig = merge_file(fig, &path);
        }
        fig = fig.merge(Env::prefixed(ENV_PREFIX).split("__"));

        Self::from_figment(fig)
    }

    /// 从指定文件加载（不读取环境变量），主要用于工具和测试
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let fig = merge_file(
            Figment::new().merge(Serialized::defaults(AppConfig::default())),
            path,
        );
        Self::from_figment(fig)
    }

    fn from_figment(fig: Figment) -> Result<Self, ConfigError> {
        let cfg: AppConfig = fig
            .extract()
            .map_err(|e| ConfigError::Load(e.to_string()))?;
        cfg.validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(cfg)
    }

    /// 代词映射表的 (符号, 角色) 列表
    pub fn pronoun_pairs(&self) -> Vec<(String, String)> {
        self.pronouns
            .mappings
            .iter()
            .map(|m| (m.emoji.clone(), m.role.clone()))
            .collect()
    }
}

fn merge_file(fig: Figment, path: &str) -> Figment {
    if path.ends_with(".yml") || path.ends_with(".yaml") {
        fig.merge(Yaml::file(path))
    } else if path.ends_with(".json") {
        fig.merge(Json::file(path))
    } else {
        fig.merge(Toml::file(path))
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
