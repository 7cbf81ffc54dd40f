//! Minimal ASCII DXF reader for laser cut files.
//!
//! DXF is a stream of (group code, value) line pairs. This reader walks the
//! `ENTITIES` section and reduces the entities a cutter cares about — `LINE`,
//! `CIRCLE`, `ARC`, and `LWPOLYLINE` with straight segments — to the three
//! [`GeometryMetrics`] the pricing engine consumes:
//!
//! - cut length: the summed path length of every entity,
//! - area: width × height of the bounding box over all entity extents,
//! - piece count: the number of closed contours (circles and closed
//!   polylines), with a minimum of one.
//!
//! Unsupported entity types are skipped with a warning; drawings made of
//! anything else entirely are rejected as empty.

use std::f64::consts::PI;

use thiserror::Error;
use tracing::warn;

use crate::models::GeometryMetrics;

/// Errors raised while reading a DXF byte stream.
#[derive(Debug, Error, PartialEq)]
pub enum DxfError {
    /// A group-code line did not hold an integer.
    #[error("line {0}: group code is not an integer: '{1}'")]
    BadGroupCode(usize, String),

    /// A value for a numeric group code did not parse.
    #[error("line {line}: group code {code} has a non-numeric value: '{value}'")]
    BadNumber {
        code: i32,
        line: usize,
        value: String,
    },

    /// The stream ended between a group code and its value.
    #[error("unexpected end of file after group code {0}")]
    TruncatedPair(i32),

    /// The file has no ENTITIES section.
    #[error("no ENTITIES section found")]
    MissingEntities,

    /// The ENTITIES section holds no supported entities.
    #[error("drawing contains no supported entities")]
    EmptyDrawing,
}

/// Reads a DXF document and reduces it to pricing metrics.
///
/// # Errors
///
/// Returns [`DxfError`] for a malformed pair stream, a missing ENTITIES
/// section, or a drawing without any supported entity.
pub fn extract_metrics(input: &str) -> Result<GeometryMetrics, DxfError> {
    let entities = parse_entities(input)?;
    if entities.is_empty() {
        return Err(DxfError::EmptyDrawing);
    }

    let cut_length_mm: f64 = entities.iter().map(Entity::path_length).sum();

    let mut bounds = Bounds::empty();
    for entity in &entities {
        entity.extend_bounds(&mut bounds);
    }

    let closed = entities.iter().filter(|e| e.is_closed()).count() as u32;

    Ok(GeometryMetrics {
        cut_length_mm,
        area_mm2: bounds.area(),
        piece_count: closed.max(1),
    })
}

// ── pair stream ──────────────────────────────────────────────────────────

struct Pair {
    code: i32,
    value: String,
    line: usize,
}

impl Pair {
    fn number(&self) -> Result<f64, DxfError> {
        self.value.parse::<f64>().map_err(|_| DxfError::BadNumber {
            code: self.code,
            line: self.line,
            value: self.value.clone(),
        })
    }
}

fn tokenize(input: &str) -> Result<Vec<Pair>, DxfError> {
    let mut pairs = Vec::new();
    let mut lines = input.lines().enumerate();

    while let Some((idx, raw)) = lines.next() {
        let code_str = raw.trim();
        // Exporters pad the end of the file with blank lines.
        if code_str.is_empty() {
            continue;
        }
        let code: i32 = code_str
            .parse()
            .map_err(|_| DxfError::BadGroupCode(idx + 1, code_str.to_string()))?;

        let Some((_, value)) = lines.next() else {
            return Err(DxfError::TruncatedPair(code));
        };

        pairs.push(Pair {
            code,
            value: value.trim().to_string(),
            line: idx + 1,
        });
    }

    Ok(pairs)
}

// ── entities ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Entity {
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        radius: f64,
    },
    Arc {
        cx: f64,
        cy: f64,
        radius: f64,
        start_deg: f64,
        end_deg: f64,
    },
    Polyline {
        points: Vec<(f64, f64)>,
        closed: bool,
    },
}

fn parse_entities(input: &str) -> Result<Vec<Entity>, DxfError> {
    let pairs = tokenize(input)?;

    // Locate (0, SECTION)(2, ENTITIES).
    let mut start = None;
    for i in 0..pairs.len().saturating_sub(1) {
        if pairs[i].code == 0
            && pairs[i].value == "SECTION"
            && pairs[i + 1].code == 2
            && pairs[i + 1].value == "ENTITIES"
        {
            start = Some(i + 2);
            break;
        }
    }
    let Some(mut i) = start else {
        return Err(DxfError::MissingEntities);
    };

    let mut entities = Vec::new();
    while i < pairs.len() {
        if pairs[i].code != 0 {
            i += 1;
            continue;
        }
        if pairs[i].value == "ENDSEC" {
            break;
        }

        let (entity, next) = parse_entity(&pairs, i)?;
        if let Some(entity) = entity {
            entities.push(entity);
        }
        i = next;
    }

    Ok(entities)
}

/// Parses one entity starting at the (0, TYPE) pair at `start`. Returns the
/// entity (or `None` for unsupported types) and the index of the next
/// code-0 pair.
fn parse_entity(
    pairs: &[Pair],
    start: usize,
) -> Result<(Option<Entity>, usize), DxfError> {
    let kind = pairs[start].value.as_str();

    let mut xs = Vec::new();
    let mut ys = Vec::new();
    let mut x2 = 0.0;
    let mut y2 = 0.0;
    let mut radius = 0.0;
    let mut start_deg = 0.0;
    let mut end_deg = 360.0;
    let mut flags = 0i64;

    let mut i = start + 1;
    while i < pairs.len() && pairs[i].code != 0 {
        let pair = &pairs[i];
        match pair.code {
            10 => xs.push(pair.number()?),
            20 => ys.push(pair.number()?),
            11 => x2 = pair.number()?,
            21 => y2 = pair.number()?,
            40 => radius = pair.number()?,
            50 => start_deg = pair.number()?,
            51 => end_deg = pair.number()?,
            70 => flags = pair.number()? as i64,
            _ => {}
        }
        i += 1;
    }

    // Missing coordinates default to 0, matching DXF semantics.
    let first_x = xs.first().copied().unwrap_or(0.0);
    let first_y = ys.first().copied().unwrap_or(0.0);

    let entity = match kind {
        "LINE" => Some(Entity::Line {
            x1: first_x,
            y1: first_y,
            x2,
            y2,
        }),
        "CIRCLE" => Some(Entity::Circle {
            cx: first_x,
            cy: first_y,
            radius,
        }),
        "ARC" => Some(Entity::Arc {
            cx: first_x,
            cy: first_y,
            radius,
            start_deg,
            end_deg,
        }),
        "LWPOLYLINE" => Some(Entity::Polyline {
            points: xs.into_iter().zip(ys).collect(),
            closed: flags & 1 == 1,
        }),
        other => {
            warn!(entity = other, "skipping unsupported DXF entity");
            None
        }
    };

    Ok((entity, i))
}

// ── geometry ─────────────────────────────────────────────────────────────

impl Entity {
    fn path_length(&self) -> f64 {
        match self {
            Self::Line { x1, y1, x2, y2 } => (x2 - x1).hypot(y2 - y1),
            Self::Circle { radius, .. } => 2.0 * PI * radius,
            Self::Arc {
                radius,
                start_deg,
                end_deg,
                ..
            } => arc_sweep_deg(*start_deg, *end_deg).to_radians() * radius,
            Self::Polyline { points, closed } => {
                let mut length: f64 = points
                    .windows(2)
                    .map(|w| (w[1].0 - w[0].0).hypot(w[1].1 - w[0].1))
                    .sum();
                if *closed && points.len() > 2 {
                    let first = points[0];
                    let last = points[points.len() - 1];
                    length += (first.0 - last.0).hypot(first.1 - last.1);
                }
                length
            }
        }
    }

    fn is_closed(&self) -> bool {
        match self {
            Self::Circle { .. } => true,
            Self::Polyline { closed, .. } => *closed,
            _ => false,
        }
    }

    fn extend_bounds(
        &self,
        bounds: &mut Bounds,
    ) {
        match self {
            Self::Line { x1, y1, x2, y2 } => {
                bounds.include(*x1, *y1);
                bounds.include(*x2, *y2);
            }
            Self::Circle { cx, cy, radius } => {
                bounds.include(cx - radius, cy - radius);
                bounds.include(cx + radius, cy + radius);
            }
            Self::Arc {
                cx,
                cy,
                radius,
                start_deg,
                end_deg,
            } => {
                let sweep = arc_sweep_deg(*start_deg, *end_deg);
                bounds.include(
                    cx + radius * start_deg.to_radians().cos(),
                    cy + radius * start_deg.to_radians().sin(),
                );
                bounds.include(
                    cx + radius * end_deg.to_radians().cos(),
                    cy + radius * end_deg.to_radians().sin(),
                );
                // Axis crossings inside the sweep extend the box to ±radius.
                for axis_deg in [0.0, 90.0, 180.0, 270.0] {
                    if (axis_deg - start_deg).rem_euclid(360.0) <= sweep {
                        bounds.include(
                            cx + radius * axis_deg.to_radians().cos(),
                            cy + radius * axis_deg.to_radians().sin(),
                        );
                    }
                }
            }
            Self::Polyline { points, .. } => {
                for (x, y) in points {
                    bounds.include(*x, *y);
                }
            }
        }
    }
}

/// Counter-clockwise sweep of an arc in degrees, in (0, 360].
///
/// Coincident start and end angles (including the 0°..360° form some
/// exporters emit) describe a full circle, not a zero-length arc.
fn arc_sweep_deg(
    start_deg: f64,
    end_deg: f64,
) -> f64 {
    let sweep = (end_deg - start_deg).rem_euclid(360.0);
    if sweep == 0.0 { 360.0 } else { sweep }
}

#[derive(Debug, Clone, Copy)]
struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    fn include(
        &mut self,
        x: f64,
        y: f64,
    ) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    fn area(&self) -> f64 {
        if self.min_x > self.max_x {
            return 0.0;
        }
        (self.max_x - self.min_x) * (self.max_y - self.min_y)
    }
}
