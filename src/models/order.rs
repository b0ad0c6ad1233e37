use serde::{Deserialize, Serialize};

/// 缺失字段的默认值
pub const DEFAULT_FIELD_VALUE: &str = "N/A";

/// 从一个 XML 文档提取出的订单
///
/// 没有 `Customer` 的文档不是合法订单，因此 `customer` 不是可选字段。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    #[serde(rename = "OrderID")]
    pub order_id: String,
    #[serde(rename = "Customer")]
    pub customer: Customer,
    #[serde(rename = "Products")]
    pub products: Vec<Product>,
}

/// 订单客户
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(rename = "CustomerID")]
    pub customer_id: String,
    #[serde(rename = "Name")]
    pub name: String,
}

/// 订单中的商品行
///
/// `quantity` 保留原文，不转换为数字。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "ProductID")]
    pub product_id: String,
    #[serde(rename = "Quantity")]
    pub quantity: String,
}

impl OrderRecord {
    /// 紧凑 JSON，写入 processed_data 表
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// 4 空格缩进的 JSON，写入输出文件
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        String::from_utf8(buf).map_err(serde::ser::Error::custom)
    }
}
