//! 订单提取服务 - 业务能力层
//!
//! 只负责"把一个 XML 文档变成 OrderRecord"，不读文件、不写日志。
//! 读取与日志属于调用方（workflow）。

use crate::error::ExtractError;
use crate::models::{Customer, OrderRecord, Product, DEFAULT_FIELD_VALUE};
use roxmltree::{Document, Node, ParsingOptions};

/// 从 XML 文本提取订单
///
/// # 参数
/// - `file_name`: 文件名（仅用于错误信息）
/// - `xml`: 文档内容
///
/// # 返回
/// - `Parse`: 文档无法解析
/// - `Validation`: 缺少 `<Customer>`
pub fn extract_order(file_name: &str, xml: &str) -> Result<OrderRecord, ExtractError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(xml, options).map_err(|e| ExtractError::Parse {
        file_name: file_name.to_string(),
        message: e.to_string(),
    })?;
    let root = doc.root_element();

    let order_id = child_text_or_default(root, "OrderID");

    let customer_node = find_child(root, "Customer").ok_or_else(|| ExtractError::Validation {
        file_name: file_name.to_string(),
    })?;
    let customer = Customer {
        customer_id: child_text_or_default(customer_node, "CustomerID"),
        name: child_text_or_default(customer_node, "Name"),
    };

    let products = match find_child(root, "Products") {
        Some(container) => container
            .children()
            .filter(|n| is_element_named(n, "Product"))
            .map(|product| Product {
                product_id: child_text_or_default(product, "ProductID"),
                quantity: child_text_or_default(product, "Quantity"),
            })
            .collect(),
        None => Vec::new(),
    };

    Ok(OrderRecord {
        order_id,
        customer,
        products,
    })
}

/// 字段级兜底：取直接子元素的文本，子元素不存在时返回 `"N/A"`
///
/// 子元素存在但没有文本时返回空字符串。文本不做 trim。
pub fn child_text_or_default(parent: Node<'_, '_>, name: &str) -> String {
    match find_child(parent, name) {
        Some(child) => leading_text(child),
        None => DEFAULT_FIELD_VALUE.to_string(),
    }
}

/// 第一个子元素之前的文本；注释和处理指令被忽略，两侧文本拼接
fn leading_text(node: Node<'_, '_>) -> String {
    node.children()
        .take_while(|n| !n.is_element())
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

/// 第一个同名的直接子元素（不递归）
fn find_child<'a, 'input>(parent: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    parent.children().find(|n| is_element_named(n, name))
}

fn is_element_named(node: &Node<'_, '_>, name: &str) -> bool {
    node.is_element() && node.tag_name().namespace().is_none() && node.tag_name().name() == name
}
