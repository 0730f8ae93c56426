//! Entry/exit classification of intersection vertexes.
use crate::core::traits::Real;
use crate::polygon::{BooleanOp, Ring, VertexKind};

/// Walks `ring` and tags every intersection vertex as [VertexKind::Entry] or
/// [VertexKind::Exit] for the given operation.
///
/// The walk starts at the ring's first non-intersection vertex, establishes whether that point
/// lies inside `other`, then toggles the running inside state at every intersection vertex.
/// The tag assigned at the moment of the toggle depends on the operation:
///
/// * `Union`: entry when currently outside the other polygon.
/// * `Intersection`: entry when currently inside.
/// * `DifferenceAB`: entry when outside on the minuend ring, entry when inside on the
///   subtrahend ring (`is_minuend` carries the role).
///
/// `DifferenceBA` and `Xor` never reach classification, they are rewritten in terms of the
/// other operations beforehand. Non-intersection vertexes are left untouched.
pub fn mark_entry_exit<T>(ring: &mut Ring<T>, other: &Ring<T>, op: BooleanOp, is_minuend: bool)
where
    T: Real,
{
    let Some(head) = ring.head_index() else {
        return;
    };

    // original vertexes always survive discovery so this finds one unless the ring is
    // entirely synthetic, in which case the head works as well as any other start
    let mut start = head;
    loop {
        if !ring.vertex(start).is_intersection {
            break;
        }
        start = ring.next_index(start);
        if start == head {
            break;
        }
    }

    let mut inside = other.contains_point(ring.vertex(start).pos);
    let mut current = start;
    loop {
        if ring.vertex(current).is_intersection {
            let entry = match op {
                BooleanOp::Union => !inside,
                BooleanOp::Intersection => inside,
                BooleanOp::DifferenceAB => {
                    if is_minuend {
                        !inside
                    } else {
                        inside
                    }
                }
                BooleanOp::DifferenceBA | BooleanOp::Xor => {
                    unreachable!("operation rewritten before classification")
                }
            };

            ring.vertex_mut(current).kind = if entry {
                VertexKind::Entry
            } else {
                VertexKind::Exit
            };
            inside = !inside;
        }

        current = ring.next_index(current);
        if current == start {
            break;
        }
    }
}
