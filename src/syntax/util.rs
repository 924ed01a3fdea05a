use tree_sitter::Node;

use super::node::GoNode;

pub(super) fn node_text<'s>(source: &'s str, node: Node<'_>) -> Option<&'s str> {
    source.get(node.start_byte()..node.end_byte())
}

pub(super) fn node_is_field(parent: Node<'_>, field_name: &str, node: Node<'_>) -> bool {
    parent
        .child_by_field_name(field_name)
        .is_some_and(|field| same_node(field, node))
}

pub(super) fn same_node(left: Node<'_>, right: Node<'_>) -> bool {
    left.start_byte() == right.start_byte()
        && left.end_byte() == right.end_byte()
        && left.kind_id() == right.kind_id()
}

pub(super) fn children<'t>(node: Node<'t>) -> impl Iterator<Item = Node<'t>> {
    (0..node.child_count()).filter_map(move |i| node.child(i))
}

pub(super) fn named_children<'t>(node: Node<'t>) -> impl Iterator<Item = Node<'t>> {
    (0..node.named_child_count()).filter_map(move |i| node.named_child(i))
}

/// Every child stored under `field_name`, for fields the grammar repeats (`a, b int`).
pub(super) fn field_children<'t>(node: Node<'t>, field_name: &str) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    let nodes = node
        .children_by_field_name(field_name, &mut cursor)
        .collect();
    nodes
}

/// Specs of a grouped or single declaration: `var x int` and `var ( x int; y int )`.
pub(super) fn specs_of(decl: Node<'_>) -> Vec<Node<'_>> {
    let mut specs = Vec::new();
    for child in named_children(decl) {
        match GoNode::of(child) {
            GoNode::TypeSpec
            | GoNode::TypeAlias
            | GoNode::VarSpec
            | GoNode::ConstSpec
            | GoNode::ImportSpec => specs.push(child),
            GoNode::Other => specs.extend(named_children(child).filter(|spec| {
                matches!(
                    GoNode::of(*spec),
                    GoNode::VarSpec | GoNode::ConstSpec | GoNode::ImportSpec
                )
            })),
            _ => {}
        }
    }
    specs
}
