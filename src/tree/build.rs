use std::collections::HashMap;
use std::time::SystemTime;

use super::{Forest, Node, NodeKind, PathDescriptor};

/// Node under construction; children refer to other slots by index.
struct Slot {
    name: String,
    kind: NodeKind,
    path: String,
    children: Vec<usize>,
    size_bytes: Option<u64>,
    modified_at: Option<SystemTime>,
}

/// Build a forest from descriptors in a single pass.
///
/// Descriptors sharing a prefix converge on the same folder node. Empty
/// segments are skipped, and a descriptor with no usable segment is dropped.
pub fn build_forest<I>(descriptors: I) -> Forest
where
    I: IntoIterator<Item = PathDescriptor>,
{
    let mut slots: Vec<Slot> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut roots: Vec<usize> = Vec::new();

    for descriptor in descriptors {
        let parts: Vec<&str> = descriptor
            .relative_path
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            tracing::debug!(path = %descriptor.relative_path, "skipping descriptor with no path segments");
            continue;
        }

        let mut current_path = String::new();
        let mut parent: Option<usize> = None;

        for (i, part) in parts.iter().enumerate() {
            let is_terminal = i == parts.len() - 1;
            if !current_path.is_empty() {
                current_path.push('/');
            }
            current_path.push_str(part);

            let id = match index.get(&current_path) {
                Some(&id) => {
                    let slot = &mut slots[id];
                    // A path seen as a file earlier becomes a folder once
                    // something is placed beneath it.
                    if !is_terminal && slot.kind == NodeKind::File {
                        slot.kind = NodeKind::Folder;
                        slot.size_bytes = None;
                        slot.modified_at = None;
                    }
                    id
                }
                None => {
                    let id = slots.len();
                    slots.push(Slot {
                        name: (*part).to_string(),
                        kind: if is_terminal {
                            NodeKind::File
                        } else {
                            NodeKind::Folder
                        },
                        path: current_path.clone(),
                        children: Vec::new(),
                        size_bytes: is_terminal.then_some(descriptor.size_bytes),
                        modified_at: is_terminal.then_some(descriptor.modified_at),
                    });
                    index.insert(current_path.clone(), id);
                    match parent {
                        Some(p) => slots[p].children.push(id),
                        None => roots.push(id),
                    }
                    id
                }
            };
            parent = Some(id);
        }
    }

    tracing::debug!(nodes = slots.len(), roots = roots.len(), "built forest");
    Forest::from_roots(materialize(slots, &roots))
}

/// Turn slots into owned nodes without recursing, so path depth is bounded
/// only by memory. A child slot is always created after its parent, so
/// walking ids from highest to lowest finishes every child before its parent.
fn materialize(slots: Vec<Slot>, roots: &[usize]) -> Vec<Node> {
    let mut done: Vec<Option<Node>> = Vec::with_capacity(slots.len());
    done.resize_with(slots.len(), || None);

    for (id, slot) in slots.into_iter().enumerate().rev() {
        let children = slot
            .children
            .iter()
            .filter_map(|&child| done[child].take())
            .collect();
        done[id] = Some(Node {
            name: slot.name,
            kind: slot.kind,
            path: slot.path,
            children,
            size_bytes: slot.size_bytes,
            modified_at: slot.modified_at,
        });
    }

    roots.iter().filter_map(|&id| done[id].take()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn descriptors(paths: &[&str]) -> Vec<PathDescriptor> {
        paths.iter().map(|p| PathDescriptor::from_path(*p)).collect()
    }

    fn names(nodes: &[Node]) -> Vec<&str> {
        nodes.iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn shared_prefixes_merge_into_one_folder() {
        let forest = build_forest(descriptors(&["a/b/c.txt", "a/b/d.txt"]));
        assert_eq!(names(forest.roots()), vec!["a"]);
        let a = &forest.roots()[0];
        assert_eq!(a.kind, NodeKind::Folder);
        assert_eq!(names(&a.children), vec!["b"]);
        let b = &a.children[0];
        assert_eq!(b.path, "a/b");
        assert_eq!(names(&b.children), vec!["c.txt", "d.txt"]);
        assert_eq!(forest.node_count(), 4);
    }

    #[test]
    fn children_keep_insertion_order() {
        let forest = build_forest(descriptors(&["z.txt", "m/x", "a.txt"]));
        assert_eq!(names(forest.roots()), vec!["z.txt", "m", "a.txt"]);
    }

    #[test]
    fn only_terminal_nodes_carry_metadata() {
        let when = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let forest = build_forest(vec![PathDescriptor::new("dir/file.rs", 42, when)]);
        let dir = &forest.roots()[0];
        assert_eq!(dir.size_bytes, None);
        assert_eq!(dir.modified_at, None);
        let file = &dir.children[0];
        assert_eq!(file.kind, NodeKind::File);
        assert_eq!(file.size_bytes, Some(42));
        assert_eq!(file.modified_at, Some(when));
        assert!(file.children.is_empty());
    }

    #[test]
    fn empty_segments_are_skipped() {
        let forest = build_forest(descriptors(&["/lead/x.txt", "lead//y.txt", "lead/z/"]));
        assert_eq!(names(forest.roots()), vec!["lead"]);
        let lead = &forest.roots()[0];
        assert_eq!(names(&lead.children), vec!["x.txt", "y.txt", "z"]);
        assert_eq!(lead.children[2].kind, NodeKind::File);
    }

    #[test]
    fn descriptors_without_segments_are_dropped() {
        let forest = build_forest(descriptors(&["", "/", "//", "ok.txt"]));
        assert_eq!(names(forest.roots()), vec!["ok.txt"]);
    }

    #[test]
    fn file_is_promoted_when_used_as_prefix() {
        let forest = build_forest(vec![
            PathDescriptor::new("a", 10, SystemTime::UNIX_EPOCH),
            PathDescriptor::from_path("a/b.txt"),
        ]);
        let a = &forest.roots()[0];
        assert_eq!(a.kind, NodeKind::Folder);
        assert_eq!(a.size_bytes, None);
        assert_eq!(names(&a.children), vec!["b.txt"]);
    }

    #[test]
    fn folder_is_not_demoted_by_later_terminal() {
        let forest = build_forest(descriptors(&["a/b.txt", "a"]));
        assert_eq!(forest.len(), 1);
        assert_eq!(forest.roots()[0].kind, NodeKind::Folder);
    }

    #[test]
    fn duplicate_descriptors_create_one_node() {
        let forest = build_forest(descriptors(&["a/b.txt", "a/b.txt"]));
        assert_eq!(forest.node_count(), 2);
    }

    #[test]
    fn materialize_handles_very_deep_chains() {
        let deep: String = (0..5_000).map(|i| format!("d{i}/")).collect::<String>() + "leaf";
        let forest = build_forest(descriptors(&[deep.as_str()]));
        assert_eq!(forest.node_count(), 5_001);
        assert_eq!(forest.find(&deep).map(|n| n.kind), Some(NodeKind::File));
    }

    #[test]
    fn empty_input_builds_empty_forest() {
        let forest = build_forest(Vec::new());
        assert!(forest.is_empty());
        assert_eq!(forest.node_count(), 0);
    }
}
