use crate::ast::Node;
use crate::position::Position;

#[derive(Debug, Clone)]
pub struct WhileNode {
    pub condition_node: Box<Node>,
    pub body_node: Box<Node>,
    pub returns_unit: bool,
    pub start: Position,
    pub end: Position,
}

impl WhileNode {
    pub fn new(condition_node: Node, body_node: Node, returns_unit: bool) -> Self {
        let start = condition_node.start().clone();
        let end = body_node.end().clone();
        Self {
            condition_node: Box::new(condition_node),
            body_node: Box::new(body_node),
            returns_unit,
            start,
            end,
        }
    }
}
