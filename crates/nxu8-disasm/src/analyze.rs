use std::collections::{HashMap, HashSet, VecDeque};

use serde::Serialize;
use tracing::{debug, trace};

use nxu8_rs::{classify, decode, OpCategory};

use crate::model::{is_mapped, slice_at, Image};

#[derive(Debug, Clone, Copy)]
pub enum EdgeKind { Fallthrough, Branch, CondBranch, Call }

#[derive(Debug, Clone, Copy)]
pub struct Edge { pub from: u32, pub to: u32, pub kind: EdgeKind }

/// Worklist flow analysis from the given entry addresses. Returns the set of
/// visited instruction addresses, their sizes, discovered edges, and the
/// addresses of return-classified instructions.
pub fn analyze_entries(img: &Image, entries: &[u32], max_instr: usize) -> (HashSet<u32>, HashMap<u32, u8>, Vec<Edge>, HashSet<u32>) {
    let mut queue: VecDeque<u32> = VecDeque::new();
    let mut visited: HashSet<u32> = HashSet::new();
    let mut sizes: HashMap<u32, u8> = HashMap::new();
    let mut edges: Vec<Edge> = Vec::new();
    let mut rets: HashSet<u32> = HashSet::new();
    for &e in entries { if is_mapped(img, e) { queue.push_back(e); } }
    let mut steps = 0usize;
    while let Some(pc) = queue.pop_front() {
        if steps >= max_instr { break; }
        if !visited.insert(pc) { continue; }
        let Some(window) = slice_at(img, pc) else { continue; };
        let Ok(d) = decode(window) else { continue; };
        steps += 1;
        sizes.insert(pc, d.size as u8);
        let info = classify(&d, pc);
        let ft = pc.wrapping_add(d.size as u32);
        trace!(pc, category = ?info.category, size = d.size, "visit");
        match info.category {
            OpCategory::Jmp => {
                // resolved by construction for relative branches
                if let Some(tgt) = info.jump {
                    edges.push(Edge { from: pc, to: tgt, kind: EdgeKind::Branch });
                    if is_mapped(img, tgt) && !visited.contains(&tgt) { queue.push_back(tgt); }
                }
            }
            OpCategory::CondJmp => {
                if let Some(tgt) = info.jump {
                    edges.push(Edge { from: pc, to: tgt, kind: EdgeKind::CondBranch });
                    if is_mapped(img, tgt) && !visited.contains(&tgt) { queue.push_back(tgt); }
                }
                if is_mapped(img, ft) && !visited.contains(&ft) { edges.push(Edge { from: pc, to: ft, kind: EdgeKind::Fallthrough }); queue.push_back(ft); }
            }
            OpCategory::Call => {
                if let Some(tgt) = info.jump {
                    edges.push(Edge { from: pc, to: tgt, kind: EdgeKind::Call });
                    if is_mapped(img, tgt) { queue.push_back(tgt); }
                } else {
                    debug!(pc, "call with unresolved target");
                }
                if is_mapped(img, ft) { edges.push(Edge { from: pc, to: ft, kind: EdgeKind::Fallthrough }); queue.push_back(ft); }
            }
            OpCategory::IndirectCall => {
                // unknown target; still add fallthrough
                if is_mapped(img, ft) { edges.push(Edge { from: pc, to: ft, kind: EdgeKind::Fallthrough }); queue.push_back(ft); }
            }
            OpCategory::Ret => {
                rets.insert(pc);
            }
            OpCategory::Trap => {
                // swi returns to the next instruction when the handler does
                if is_mapped(img, ft) && !visited.contains(&ft) { edges.push(Edge { from: pc, to: ft, kind: EdgeKind::Fallthrough }); queue.push_back(ft); }
            }
            _ => {
                if is_mapped(img, ft) && !visited.contains(&ft) { edges.push(Edge { from: pc, to: ft, kind: EdgeKind::Fallthrough }); queue.push_back(ft); }
            }
        }
    }
    (visited, sizes, edges, rets)
}

#[derive(Debug, Clone, Serialize)]
pub struct Block { pub start: u32, pub end: u32 }

#[derive(Debug, Clone, Serialize)]
pub struct EdgeOut { pub from: u32, pub to: u32, pub kind: String }

#[derive(Debug, Clone, Serialize)]
pub struct FunctionOut { pub entry: u32, pub blocks: Vec<u32> }

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Segment;

    fn image(base: u32, bytes: Vec<u8>) -> Image {
        Image { segments: vec![Segment { name: "s".into(), base, bytes, perms: "r-x", kind: "raw" }] }
    }

    #[test]
    fn conditional_branch_spawns_both_successors() {
        // beq +01h; nop; nop
        let img = image(0, vec![0x01, 0xc9, 0x8f, 0xfe, 0x8f, 0xfe]);
        let (visited, sizes, edges, _) = analyze_entries(&img, &[0], 100);
        assert!(visited.contains(&0) && visited.contains(&2) && visited.contains(&4));
        assert_eq!(sizes[&0], 2);
        assert!(edges.iter().any(|e| matches!(e.kind, EdgeKind::CondBranch) && e.from == 0 && e.to == 4));
        assert!(edges.iter().any(|e| matches!(e.kind, EdgeKind::Fallthrough) && e.from == 0 && e.to == 2));
    }

    #[test]
    fn returns_terminate_paths() {
        // rt; nop (unreachable)
        let img = image(0, vec![0x1f, 0xfe, 0x8f, 0xfe]);
        let (visited, _, edges, rets) = analyze_entries(&img, &[0], 100);
        assert!(rets.contains(&0));
        assert!(!visited.contains(&2));
        assert!(edges.is_empty());
    }

    #[test]
    fn far_call_queues_target_when_mapped() {
        // bl 0h:0008h; rt; padding; target: rt
        let img = image(0, vec![
            0x01, 0xf0, 0x08, 0x00, // bl 0h:0008h
            0x1f, 0xfe, // rt
            0x8f, 0xfe, // nop (never reached)
            0x1f, 0xfe, // rt at 8
        ]);
        let (visited, _, edges, rets) = analyze_entries(&img, &[0], 100);
        assert!(edges.iter().any(|e| matches!(e.kind, EdgeKind::Call) && e.to == 8));
        assert!(visited.contains(&8));
        assert!(rets.contains(&8));
        // fallthrough after the call site
        assert!(edges.iter().any(|e| matches!(e.kind, EdgeKind::Fallthrough) && e.from == 0 && e.to == 4));
    }
}
