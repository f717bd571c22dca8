use crate::ast::Node;
use crate::position::Position;

#[derive(Debug, Clone)]
pub struct CallNode {
    pub node_to_call: Box<Node>,
    pub arg_nodes: Vec<Node>,
    pub start: Position,
    pub end: Position,
}

impl CallNode {
    pub fn new(node_to_call: Node, arg_nodes: Vec<Node>, end: Position) -> Self {
        let start = node_to_call.start().clone();
        Self {
            node_to_call: Box::new(node_to_call),
            arg_nodes,
            start,
            end,
        }
    }
}
