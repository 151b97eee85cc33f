// Generates ../src/palettes.rs from palettes.hjson.  Run from tools/:
//
//     cargo run --release

use std::{string::String,
          collections::BTreeMap,
          env,
          fs::File,
          io::{BufWriter, prelude::*},
          error::Error};
use serde_hjson::Value::{self, *};

/// Number of colors of each palette of a mode.
const CONTINUOUS_LEN: usize = 6;
const CLASSIFIED_LEN: usize = 7;

#[derive(Debug)]
struct Palette {
    rgb: Vec<[u8; 3]>, // RGB Colors of the palette
    typ: String,
    blind: String,
}

type Modes = BTreeMap<String, [Palette; 2]>;

fn capitalize(s: &str) -> String {
    s.chars().enumerate().map(|(i, c)| {
        if i == 0 { c.to_ascii_uppercase() }
        else { c }}).collect()
}

/// Convert colors such as "#43a2ca" to `[67, 162, 202]`.
fn parse_color(s: &str) -> [u8; 3] {
    let hex = match s.strip_prefix('#') {
        Some(h) if h.len() == 6 => h,
        _ => panic!("ndvi-palette-tools: not a color “{}”", s) };
    let mut rgb = [0; 3];
    for (i, c) in rgb.iter_mut().enumerate() {
        *c = match u8::from_str_radix(&hex[2 * i .. 2 * i + 2], 16) {
            Ok(c) => c,
            Err(_) => panic!("ndvi-palette-tools: not a color “{}”", s) };
    }
    rgb
}

fn string_prop<'a>(p: &'a serde_hjson::Map<String, Value>, name: &str) -> &'a str {
    match p.get(name) {
        Some(String(s)) => s,
        v => panic!("ndvi-palette-tools: {name} = {v:?}"),
    }
}

fn palette(mode: &str, which: &str, value: Option<&Value>, len: usize)
           -> Palette {
    let p = match value {
        Some(Object(p)) => p,
        _ => panic!("ndvi-palette-tools: {mode} has no {which} palette") };
    let typ = string_prop(p, "type");
    let blind = string_prop(p, "blind");
    assert!(matches!(typ, "seq" | "div"), "{mode}.{which}: type {typ}");
    assert!(matches!(blind, "yes" | "maybe" | "no"),
            "{mode}.{which}: blind {blind}");
    let rgb: Vec<_> = match p.get("colors") {
        Some(Array(a)) => a.iter()
            .map(|v| match v {
                String(c) => parse_color(c),
                _ => panic!("ndvi-palette-tools: {mode}.{which}: {v:?}") })
            .collect(),
        _ => panic!("ndvi-palette-tools: {mode}.{which} has no colors") };
    assert_eq!(rgb.len(), len, "{mode}.{which}");
    Palette { rgb, typ: capitalize(typ), blind: capitalize(blind) }
}

fn modes_from_json(json: Value) -> Modes {
    let mut modes = Modes::new();
    if let Object(m) = json {
        for (name, palettes) in m.into_iter() {
            let p = match &palettes {
                Object(p) => p,
                _ => panic!("ndvi-palette-tools: {name} is not an object") };
            let continuous = palette(&name, "continuous", p.get("continuous"),
                                     CONTINUOUS_LEN);
            let classified = palette(&name, "classified", p.get("classified"),
                                     CLASSIFIED_LEN);
            modes.insert(name, [continuous, classified]);
        }
    }
    modes
}

fn main() -> Result<(), Box<dyn Error>> {
    let fh = File::open("palettes.hjson")?;
    let json: Value = serde_hjson::from_reader(fh)?;
    let modes = modes_from_json(json);

    let mut fh = BufWriter::new(File::create("../src/palettes.rs")?);
    writeln!(fh, "// Written by {}\n\n\
                  use lazy_static::lazy_static;\n\
                  pub(crate) mod ty;\n\
                  use ty::*;\n",
             env::args().next().unwrap_or_default())?;
    for (name, palettes) in &modes {
        for (suffix, p) in ["CONTINUOUS", "CLASSIFIED"].iter().zip(palettes) {
            write!(fh, "lazy_static! {{\n  \
                        pub(crate) static ref {}_{suffix}: PaletteData = {{\n    \
                        PaletteData {{\n      \
                        typ: PaletteType::{},\n      \
                        blind: Trivalent::{},\n      \
                        rgb: vec![\n",
                   name.to_ascii_uppercase(), p.typ, p.blind)?;
            for [r, g, b] in &p.rgb {
                writeln!(fh, "        RGBA{{r: {:.1}, g: {:.1}, b: {:.1}, \
                              a: 255.}},", *r as f64, *g as f64, *b as f64)?;
            }
            writeln!(fh, "      ]}}\n  }};\n}}\n")?;
        }
    }
    Ok(())
}
