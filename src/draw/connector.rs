use crate::canvas::Canvas;
use crate::ir::Position;

use super::DrawContext;

/// One leg of a tree connector, as a polyline in source pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Wire {
    pub points: Vec<(f32, f32)>,
}

impl Wire {
    fn line(from: (f32, f32), to: (f32, f32)) -> Self {
        Self {
            points: vec![from, to],
        }
    }

    pub fn segments(&self) -> impl Iterator<Item = ((f32, f32), (f32, f32))> + '_ {
        self.points.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

/// Routes an orthogonal tree connector from the bottom-center of `parent`
/// to the top of every child.
///
/// The horizontal bus runs halfway between the parent's bottom edge and the
/// first child's top edge. Children are expected to share a top edge; when
/// they don't, the bus still follows the first child.
pub fn route(parent: &Position, children: &[Position]) -> Vec<Wire> {
    let Some(first) = children.first() else {
        return Vec::new();
    };
    let anchor = (parent.center_x(), parent.bottom());
    let mid_y = anchor.1 + (first.y - anchor.1) / 2.0;

    let mut wires = vec![Wire::line(anchor, (anchor.0, mid_y))];
    if let [only] = children {
        let child_x = only.center_x();
        wires.push(Wire {
            points: vec![(anchor.0, mid_y), (child_x, mid_y), (child_x, only.y)],
        });
        return wires;
    }

    let (left_x, right_x) = children
        .iter()
        .map(Position::center_x)
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), x| {
            (lo.min(x), hi.max(x))
        });
    wires.push(Wire::line((left_x, mid_y), (right_x, mid_y)));
    for child in children {
        let child_x = child.center_x();
        wires.push(Wire::line((child_x, mid_y), (child_x, child.y)));
    }
    wires
}

/// Routes and draws a connector; returns the number of line segments drawn.
pub fn draw_connector(
    canvas: &mut dyn Canvas,
    ctx: &DrawContext<'_>,
    parent: &Position,
    children: &[Position],
) -> usize {
    let stroke = ctx.connector_stroke();
    let mut drawn = 0;
    for wire in route(parent, children) {
        for (from, to) in wire.segments() {
            canvas.add_line_segment(ctx.point(from), ctx.point(to), stroke);
            drawn += 1;
        }
    }
    drawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Scene;
    use crate::config::ChartConfig;
    use crate::style::StyleTable;
    use crate::theme::Theme;

    fn parent() -> Position {
        Position::new(500.0, 20.0, 200.0, 40.0)
    }

    fn row(xs: &[f32]) -> Vec<Position> {
        xs.iter()
            .map(|x| Position::new(*x, 100.0, 100.0, 30.0))
            .collect()
    }

    #[test]
    fn no_children_no_wires() {
        assert!(route(&parent(), &[]).is_empty());
    }

    #[test]
    fn single_child_is_drop_plus_dog_leg() {
        let wires = route(&parent(), &row(&[100.0]));
        assert_eq!(wires.len(), 2);
        assert_eq!(wires[0].points, vec![(600.0, 60.0), (600.0, 80.0)]);
        assert_eq!(
            wires[1].points,
            vec![(600.0, 80.0), (150.0, 80.0), (150.0, 100.0)]
        );
    }

    #[test]
    fn three_children_are_comb() {
        let wires = route(&parent(), &row(&[300.0, 100.0, 900.0]));
        assert_eq!(wires.len(), 5);
        // drop, bus, then one stub per child in input order
        assert_eq!(wires[0].points, vec![(600.0, 60.0), (600.0, 80.0)]);
        assert_eq!(wires[1].points, vec![(150.0, 80.0), (950.0, 80.0)]);
        assert_eq!(wires[2].points, vec![(350.0, 80.0), (350.0, 100.0)]);
        assert_eq!(wires[3].points, vec![(150.0, 80.0), (150.0, 100.0)]);
        assert_eq!(wires[4].points, vec![(950.0, 80.0), (950.0, 100.0)]);
    }

    #[test]
    fn every_child_gets_one_stub_ending_at_its_top() {
        let children = row(&[0.0, 200.0, 400.0, 600.0]);
        let wires = route(&parent(), &children);
        for child in &children {
            let stubs: Vec<&Wire> = wires
                .iter()
                .filter(|w| w.points.last() == Some(&(child.center_x(), child.y)))
                .collect();
            assert_eq!(stubs.len(), 1);
        }
    }

    #[test]
    fn bus_follows_first_child_only() {
        let mut children = row(&[100.0, 400.0]);
        children[1].y = 200.0;
        let wires = route(&parent(), &children);
        assert_eq!(wires[1].points[0].1, 80.0);
        assert_eq!(wires[3].points, vec![(450.0, 80.0), (450.0, 200.0)]);
    }

    #[test]
    fn routing_is_deterministic() {
        let children = row(&[10.0, 250.0, 730.0]);
        assert_eq!(route(&parent(), &children), route(&parent(), &children));
    }

    #[test]
    fn drawing_converts_every_segment() {
        let (styles, theme, chart) = (StyleTable::new(), Theme::default(), ChartConfig::default());
        let ctx = DrawContext::new(&styles, &theme, &chart);
        let mut scene = Scene::new(16.54, 11.69);

        assert_eq!(draw_connector(&mut scene, &ctx, &parent(), &row(&[100.0])), 3);
        assert_eq!(draw_connector(&mut scene, &ctx, &parent(), &row(&[100.0, 700.0])), 4);
        assert_eq!(draw_connector(&mut scene, &ctx, &parent(), &[]), 0);
        assert_eq!(scene.lines.len(), 7);

        let first = scene.lines[0];
        assert!((first.from.x - ctx.units.to_x(600.0)).abs() < 1e-6);
        assert!((first.to.y - ctx.units.to_y(80.0)).abs() < 1e-6);
        assert_eq!(first.stroke.width, 0.5);
    }
}
