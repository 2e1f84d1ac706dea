use crate::canvas::Canvas;
use crate::error::RenderError;
use crate::ir::{
    AdditionalPosition, BoxNode, Division, MainDivisions, OrgStructure, Position, Zone,
};

use super::{DrawContext, draw_box, draw_composite, draw_connector, draw_node, draw_section_header};

/// A parent box and the boxes hanging off it, connected once both are known.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionGroup {
    pub parent: Position,
    pub children: Vec<Position>,
}

impl ConnectionGroup {
    fn draw(&self, canvas: &mut dyn Canvas, ctx: &DrawContext<'_>) {
        draw_connector(canvas, ctx, &self.parent, &self.children);
    }
}

/// Draws every box of the organisational structure and its connectors.
///
/// Every slot is optional. Tier connections (top box to departments, the
/// staff-parent department to the staff row) are drawn last, after all boxes.
pub fn render_tree(
    canvas: &mut dyn Canvas,
    ctx: &DrawContext<'_>,
    org: &OrgStructure,
) -> Result<(), RenderError> {
    let top = match &org.level_1_top_management {
        Some(node) => {
            draw_node(canvas, ctx, node)?;
            Some(node.position)
        }
        None => None,
    };

    let departments = draw_row(canvas, ctx, &org.level_2_departments)?;
    let staff_parent = org
        .level_2_departments
        .iter()
        .find(|dept| dept.id.as_deref() == Some(ctx.chart.staff_parent_id.as_str()))
        .map(|dept| dept.position);
    let staff = draw_row(canvas, ctx, &org.level_3_project_staff)?;

    if let Some(main) = &org.main_project_divisions {
        render_main_divisions(canvas, ctx, main)?;
    }

    for entry in &org.additional_positions {
        render_additional(canvas, ctx, entry)?;
    }

    let tiers = [(top, departments), (staff_parent, staff)];
    for (parent, children) in tiers {
        if let Some(parent) = parent {
            ConnectionGroup { parent, children }.draw(canvas, ctx);
        }
    }
    Ok(())
}

fn draw_row(
    canvas: &mut dyn Canvas,
    ctx: &DrawContext<'_>,
    nodes: &[BoxNode],
) -> Result<Vec<Position>, RenderError> {
    nodes
        .iter()
        .map(|node| draw_node(canvas, ctx, node).map(|_| node.position))
        .collect()
}

fn render_main_divisions(
    canvas: &mut dyn Canvas,
    ctx: &DrawContext<'_>,
    main: &MainDivisions,
) -> Result<(), RenderError> {
    if let Some(header) = &main.division_header {
        draw_section_header(canvas, ctx, header)?;
    }
    for division in &main.divisions {
        render_division(canvas, ctx, division)?;
    }
    Ok(())
}

fn render_division(
    canvas: &mut dyn Canvas,
    ctx: &DrawContext<'_>,
    division: &Division,
) -> Result<(), RenderError> {
    // Staff, draftsmen and driver only belong to a division that has a header.
    if let Some(header) = &division.division_header {
        draw_node(canvas, ctx, header)?;
        let staff = draw_row(canvas, ctx, &division.staff)?;
        ConnectionGroup {
            parent: header.position,
            children: staff,
        }
        .draw(canvas, ctx);
        draw_row(canvas, ctx, &division.draftsmen)?;
        if let Some(driver) = &division.driver {
            draw_node(canvas, ctx, driver)?;
        }
    }

    if let Some(manager) = &division.project_manager {
        draw_node(canvas, ctx, manager)?;
        let mut anchors = Vec::with_capacity(division.zones.len());
        for zone in &division.zones {
            if let Some(anchor) = render_zone(canvas, ctx, zone)? {
                anchors.push(anchor);
            }
        }
        ConnectionGroup {
            parent: manager.position,
            children: anchors,
        }
        .draw(canvas, ctx);
    }
    Ok(())
}

/// Draws a zone and returns the position its manager connects to.
fn render_zone(
    canvas: &mut dyn Canvas,
    ctx: &DrawContext<'_>,
    zone: &Zone,
) -> Result<Option<Position>, RenderError> {
    match zone {
        Zone::Managed(managed) => {
            let manager = &managed.zone_manager;
            draw_node(canvas, ctx, manager)?;
            let staff = draw_row(canvas, ctx, &managed.staff)?;
            ConnectionGroup {
                parent: manager.position,
                children: staff,
            }
            .draw(canvas, ctx);
            if let Some(summary) = &managed.manpower_summary {
                draw_node(canvas, ctx, summary)?;
            }
            Ok(Some(manager.position))
        }
        Zone::Standalone(standalone) => {
            draw_box(
                canvas,
                ctx,
                &standalone.position,
                &standalone.style,
                &standalone.content,
            )?;
            Ok(Some(standalone.position))
        }
        Zone::Unrecognized(_) => {
            tracing::warn!("zone has neither a zone manager nor a zone id, skipping");
            Ok(None)
        }
    }
}

fn render_additional(
    canvas: &mut dyn Canvas,
    ctx: &DrawContext<'_>,
    entry: &AdditionalPosition,
) -> Result<(), RenderError> {
    match entry {
        AdditionalPosition::Group { positions } => {
            draw_row(canvas, ctx, positions)?;
        }
        AdditionalPosition::Composite(composite) => {
            draw_composite(canvas, ctx, composite)?;
        }
        AdditionalPosition::Single(node) => {
            draw_node(canvas, ctx, node)?;
        }
        AdditionalPosition::Unrecognized(_) => {
            tracing::warn!("additional position is not a box, box list or composite box, skipping");
        }
    }
    Ok(())
}
