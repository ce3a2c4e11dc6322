use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::MatchStatus;

/// 知识图谱节点分组
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeGroup {
    Vendor,
    Gstr,
    Invoice,
    #[serde(rename = "einvoice")]
    EInvoice,
    #[serde(rename = "ewaybill")]
    EWayBill,
}

/// 申报表类型 (买卖双方各一份, 交叉核对的两条腿)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReturnType {
    #[serde(rename = "GSTR-1")]
    Gstr1,
    #[serde(rename = "GSTR-2B")]
    Gstr2b,
}

impl ReturnType {
    pub const ALL: [ReturnType; 2] = [ReturnType::Gstr1, ReturnType::Gstr2b];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReturnType::Gstr1 => "GSTR-1",
            ReturnType::Gstr2b => "GSTR-2B",
        }
    }
}

impl std::fmt::Display for ReturnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 图节点 (分组之外的字段按需携带)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub group: NodeGroup,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gstin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub return_type: Option<ReturnType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_status: Option<MatchStatus>,
}

impl GraphNode {
    pub fn new(id: String, label: String, group: NodeGroup) -> Self {
        Self {
            id,
            label,
            group,
            gstin: None,
            risk: None,
            state: None,
            status: None,
            return_type: None,
            period: None,
            amount: None,
            match_status: None,
        }
    }
}

/// 有向边分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Issued,
    Reported,
    #[serde(rename = "einvoice")]
    EInvoice,
    #[serde(rename = "ewaybill")]
    EWayBill,
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub label: &'static str,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
}

/// 整图视图 — 源集合每次变化后全量重建, 自身不持有状态
#[derive(Debug, Clone, Default, Serialize)]
pub struct GraphView {
    pub nodes: Vec<GraphNode>,
    #[serde(rename = "links")]
    pub edges: Vec<GraphEdge>,
}

impl GraphView {
    /// 按可见分组过滤; 任一端点被隐藏的边一并丢弃, 不留悬挂引用
    pub fn retain_groups(&self, visible: &[NodeGroup]) -> GraphView {
        let nodes: Vec<GraphNode> = self
            .nodes
            .iter()
            .filter(|n| visible.contains(&n.group))
            .cloned()
            .collect();
        let ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        let edges = self
            .edges
            .iter()
            .filter(|e| ids.contains(e.source.as_str()) && ids.contains(e.target.as_str()))
            .cloned()
            .collect();
        GraphView { nodes, edges }
    }
}
