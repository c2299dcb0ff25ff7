use std::collections::BTreeMap;

use serde_json::Value;

use crate::types::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScriptedInput {
    pub tick: u64,
    pub dir: Direction,
}

/// Parses one `{"tick": N, "dir": "left"}` line. A `dir` that is not a
/// cardinal name becomes `Direction::None`, which the engine ignores.
pub fn parse_input_line(raw: &str) -> Option<ScriptedInput> {
    let value: Value = serde_json::from_str(raw).ok()?;
    let object = value.as_object()?;
    let tick = object.get("tick")?.as_u64()?;
    let dir = match object.get("dir")? {
        Value::String(name) => Direction::parse_move(name).unwrap_or(Direction::None),
        Value::Null => Direction::None,
        _ => return None,
    };
    Some(ScriptedInput { tick, dir })
}

/// Inputs keyed by the tick before which they are submitted, in file order.
#[derive(Clone, Debug, Default)]
pub struct InputScript {
    by_tick: BTreeMap<u64, Vec<Direction>>,
}

impl InputScript {
    pub fn from_text(text: &str) -> Self {
        let mut script = Self::default();
        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match parse_input_line(line) {
                Some(input) => script.push(input),
                None => log::warn!("skipping malformed script line {}: {line}", index + 1),
            }
        }
        script
    }

    pub fn push(&mut self, input: ScriptedInput) {
        self.by_tick.entry(input.tick).or_default().push(input.dir);
    }

    pub fn inputs_at(&self, tick: u64) -> &[Direction] {
        self.by_tick.get(&tick).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.by_tick.is_empty()
    }
}
