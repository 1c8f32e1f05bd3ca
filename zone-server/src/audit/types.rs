//! 活动日志类型定义
//!
//! 条目写入后不可变。`action` 为封闭枚举而非自由文本，前端可据此过滤。

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 活动类型（枚举，非自由文本）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    // ═══ 区域 ═══
    /// 区域已创建
    ZoneCreated,
    /// 区域信息或多边形已修改
    ZoneUpdated,
    /// 区域已删除（释放所属房产）
    ZoneDeleted,
    /// 新区域的初始扫描分配了房产
    ZonePropertiesAssigned,
    /// 已有区域重新计算归属
    ZoneResweep,

    // ═══ 房产 ═══
    /// 房产已登记
    PropertyCreated,
    /// 已保存地理编码结果
    PropertyLocated,
    /// 手动指定区域
    PropertyZoneAssigned,
}

impl AuditAction {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ZoneCreated => "zone_created",
            Self::ZoneUpdated => "zone_updated",
            Self::ZoneDeleted => "zone_deleted",
            Self::ZonePropertiesAssigned => "zone_properties_assigned",
            Self::ZoneResweep => "zone_resweep",
            Self::PropertyCreated => "property_created",
            Self::PropertyLocated => "property_located",
            Self::PropertyZoneAssigned => "property_zone_assigned",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zone_created" => Ok(Self::ZoneCreated),
            "zone_updated" => Ok(Self::ZoneUpdated),
            "zone_deleted" => Ok(Self::ZoneDeleted),
            "zone_properties_assigned" => Ok(Self::ZonePropertiesAssigned),
            "zone_resweep" => Ok(Self::ZoneResweep),
            "property_created" => Ok(Self::PropertyCreated),
            "property_located" => Ok(Self::PropertyLocated),
            "property_zone_assigned" => Ok(Self::PropertyZoneAssigned),
            other => Err(format!("unknown audit action: {other}")),
        }
    }
}

/// 活动日志条目（不可变）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// 单调递增的行 ID
    pub id: i64,
    /// Unix 毫秒时间戳
    pub timestamp: i64,
    pub action: AuditAction,
    /// 可读摘要
    pub description: String,
    /// 例如区域 ID
    pub related_id: Option<String>,
    /// 例如 "zone"、"property"
    pub related_type: Option<String>,
    /// 结构化详情 (JSON)
    pub metadata: serde_json::Value,
}

/// 活动日志查询参数
#[derive(Debug, Clone, Deserialize)]
pub struct AuditQuery {
    pub action: Option<AuditAction>,
    pub related_type: Option<String>,
    pub related_id: Option<String>,
    #[serde(default)]
    pub offset: usize,
    /// 每页条数（默认 50）
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    50
}

impl Default for AuditQuery {
    fn default() -> Self {
        Self {
            action: None,
            related_type: None,
            related_id: None,
            offset: 0,
            limit: default_limit(),
        }
    }
}

/// 活动日志列表响应
#[derive(Debug, Serialize, Deserialize)]
pub struct AuditListResponse {
    pub items: Vec<AuditEntry>,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_string_roundtrip_matches_serde() {
        let actions = [
            AuditAction::ZoneCreated,
            AuditAction::ZoneUpdated,
            AuditAction::ZoneDeleted,
            AuditAction::ZonePropertiesAssigned,
            AuditAction::ZoneResweep,
            AuditAction::PropertyCreated,
            AuditAction::PropertyLocated,
            AuditAction::PropertyZoneAssigned,
        ];
        for action in actions {
            let json = serde_json::to_string(&action).unwrap();
            assert_eq!(json, format!("\"{}\"", action.as_str()));
            assert_eq!(action.as_str().parse::<AuditAction>().unwrap(), action);
        }
        assert!("zone_exploded".parse::<AuditAction>().is_err());
    }

    #[test]
    fn test_query_defaults() {
        let q: AuditQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.offset, 0);
        assert_eq!(q.limit, 50);
        assert!(q.action.is_none());
    }
}
