//! AutoLISP script serialization.
//!
//! The emitter's abstract command sequence becomes a textual command
//! stream: prolog (error handler, snap off, undo group), layer
//! creation from the layer table, one command form per DrawCommand,
//! and a zoom/undo epilog. Icon references expand into glyph
//! primitives here; the core never sees glyph geometry.

use std::fmt::Write;

use crate::config::DrawingConfig;
use crate::draw::command::{DrawCommand, Justify};
use crate::plan::LayoutPoint;

/// Icon names with a glyph in this dialect. Device styles are checked
/// against this set at config load.
pub const KNOWN_ICONS: &[&str] = &["access_point", "handset", "display", "camera", "data_point"];

/// Serializes the command sequence into a complete AutoLISP script.
#[must_use]
pub fn render_script(commands: &[DrawCommand], config: &DrawingConfig) -> String {
    let mut out = String::new();

    push(&mut out, r#"(setq *error* (lambda (msg) (if msg (princ (strcat "\nError: " msg)))))"#);
    push(&mut out, r#"(setvar "OSMODE" 0)"#);
    push(&mut out, r#"(command "_.UNDO" "BEGIN")"#);

    for (layer, color) in &config.layers {
        let _ = writeln!(
            out,
            r#"(command "-LAYER" "N" "{}" "C" "{color}" "" "")"#,
            escape(layer)
        );
    }

    let mut current: Option<(&str, u16)> = None;
    for command in commands {
        select_layer(&mut out, &mut current, command);
        match command {
            DrawCommand::Line { from, to, .. } => {
                let _ = writeln!(
                    out,
                    r#"(command "_.LINE" {} {} "")"#,
                    point(*from),
                    point(*to)
                );
            }
            DrawCommand::Rectangle {
                corner, opposite, ..
            } => {
                let _ = writeln!(
                    out,
                    r#"(command "_.PLINE" {} {} {} {} "C")"#,
                    point(*corner),
                    point(LayoutPoint::new(opposite.x, corner.y)),
                    point(*opposite),
                    point(LayoutPoint::new(corner.x, opposite.y))
                );
            }
            DrawCommand::Label {
                at,
                height,
                justify,
                text,
                ..
            } => {
                let _ = writeln!(
                    out,
                    r#"(command "-TEXT" "S" "Standard" "J" "{}" {} {height} 0 "{}")"#,
                    justify_code(*justify),
                    point(*at),
                    escape(text)
                );
            }
            DrawCommand::IconRef { icon, at, .. } => glyph(&mut out, icon, *at),
        }
    }

    push(&mut out, r#"(command "_.ZOOM" "E")"#);
    push(&mut out, r#"(command "_.UNDO" "END")"#);
    push(&mut out, r#"(princ "\nDrawing complete.")"#);

    out
}

/// Emits layer/color selection, skipping repeats of the current pair.
fn select_layer<'a>(
    out: &mut String,
    current: &mut Option<(&'a str, u16)>,
    command: &'a DrawCommand,
) {
    let layer = command.layer();
    let color = match command {
        DrawCommand::Line { color, .. }
        | DrawCommand::Rectangle { color, .. }
        | DrawCommand::Label { color, .. }
        | DrawCommand::IconRef { color, .. } => *color,
    };
    if *current != Some((layer, color)) {
        let _ = writeln!(out, r#"(command "-LAYER" "S" "{}" "")"#, escape(layer));
        let _ = writeln!(out, r#"(command "-COLOR" "{color}")"#);
        *current = Some((layer, color));
    }
}

fn push(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

fn point(p: LayoutPoint) -> String {
    format!("(list {} {})", p.x, p.y)
}

fn escape(text: &str) -> String {
    text.replace('"', "\\\"")
}

fn justify_code(justify: Justify) -> &'static str {
    match justify {
        Justify::Left => "BL",
        Justify::Center => "C",
        Justify::MiddleCenter => "MC",
    }
}

fn circle(out: &mut String, center: LayoutPoint, radius: f64) {
    let _ = writeln!(out, r#"(command "_.CIRCLE" {} {radius})"#, point(center));
}

fn polyline(out: &mut String, points: &[LayoutPoint], closed: bool) {
    let mut form = String::from(r#"(command "_.PLINE""#);
    for p in points {
        let _ = write!(form, " {}", point(*p));
    }
    form.push_str(if closed { r#" "C")"# } else { r#" "")"# });
    push(out, &form);
}

/// Expands an icon reference into glyph primitives anchored at `at`.
///
/// Unknown names are unreachable in practice: device styles are
/// validated against [`KNOWN_ICONS`] at config load.
fn glyph(out: &mut String, icon: &str, at: LayoutPoint) {
    let LayoutPoint { x, y } = at;
    match icon {
        "access_point" => {
            // Antenna mast with radiating arcs.
            polyline(
                out,
                &[
                    LayoutPoint::new(x - 10.0, y),
                    LayoutPoint::new(x + 10.0, y),
                    LayoutPoint::new(x, y + 25.0),
                    LayoutPoint::new(x - 10.0, y),
                ],
                false,
            );
            let tip = LayoutPoint::new(x, y + 25.0);
            for radius in [10.0, 21.25, 30.0] {
                circle(out, tip, radius);
            }
        }
        "handset" => {
            rect(out, LayoutPoint::new(x - 10.0, y), LayoutPoint::new(x + 10.0, y + 30.0));
            circle(out, LayoutPoint::new(x, y + 37.0), 5.0);
        }
        "display" => {
            rect(out, LayoutPoint::new(x - 20.0, y), LayoutPoint::new(x + 20.0, y + 25.0));
            polyline(
                out,
                &[
                    LayoutPoint::new(x - 10.0, y),
                    LayoutPoint::new(x + 10.0, y),
                    LayoutPoint::new(x, y - 10.0),
                    LayoutPoint::new(x - 10.0, y),
                ],
                false,
            );
        }
        "camera" => {
            rect(out, LayoutPoint::new(x - 10.0, y), LayoutPoint::new(x + 10.0, y + 15.0));
            circle(out, LayoutPoint::new(x, y + 7.5), 3.0);
        }
        "data_point" => {
            polyline(
                out,
                &[
                    LayoutPoint::new(x - 10.0, y),
                    LayoutPoint::new(x + 10.0, y),
                    LayoutPoint::new(x, y + 20.0),
                ],
                true,
            );
            push(out, r#"(command "-HATCH" "S" "L" "" "")"#);
        }
        _ => {}
    }
}

fn rect(out: &mut String, corner: LayoutPoint, opposite: LayoutPoint) {
    polyline(
        out,
        &[
            corner,
            LayoutPoint::new(opposite.x, corner.y),
            opposite,
            LayoutPoint::new(corner.x, opposite.y),
        ],
        true,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::drawing::sample_config;
    use pretty_assertions::assert_eq;

    #[test]
    fn script_wraps_commands_in_prolog_and_epilog() {
        let config = sample_config();
        let commands = vec![DrawCommand::Line {
            layer: "levels".to_string(),
            color: 8,
            from: LayoutPoint::new(0.0, 0.0),
            to: LayoutPoint::new(100.0, 0.0),
        }];
        let script = render_script(&commands, &config);
        assert!(script.starts_with("(setq *error*"));
        assert!(script.contains(r#"(command "_.LINE" (list 0 0) (list 100 0) "")"#));
        assert!(script.trim_end().ends_with(r#"(princ "\nDrawing complete.")"#));
    }

    #[test]
    fn creates_every_configured_layer() {
        let config = sample_config();
        let script = render_script(&[], &config);
        for layer in config.layers.keys() {
            assert!(
                script.contains(&format!(r#""-LAYER" "N" "{layer}""#)),
                "missing layer {layer}"
            );
        }
    }

    #[test]
    fn labels_escape_quotes() {
        let config = sample_config();
        let commands = vec![DrawCommand::Label {
            layer: "labels".to_string(),
            color: 7,
            at: LayoutPoint::new(5.0, 5.0),
            height: 10.0,
            justify: Justify::Center,
            text: r#"say "hi""#.to_string(),
        }];
        let script = render_script(&commands, &config);
        assert!(script.contains(r#"say \"hi\""#));
    }

    #[test]
    fn icon_expands_to_glyph_primitives() {
        let config = sample_config();
        let commands = vec![DrawCommand::IconRef {
            layer: "aps".to_string(),
            color: 3,
            icon: "access_point".to_string(),
            at: LayoutPoint::new(0.0, 0.0),
        }];
        let script = render_script(&commands, &config);
        let circles = script.matches("_.CIRCLE").count();
        assert_eq!(circles, 3);
    }
}
