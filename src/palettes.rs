// Written by target/release/ndvi-palette-tools

use lazy_static::lazy_static;
pub(crate) mod ty;
use ty::*;

lazy_static! {
  pub(crate) static ref ACHROMATOPSIA_CONTINUOUS: PaletteData = {
    PaletteData {
      typ: PaletteType::Seq,
      blind: Trivalent::Yes,
      rgb: vec![
        RGBA{r: 64.0, g: 125.0, b: 224.0, a: 255.},
        RGBA{r: 39.0, g: 99.0, b: 218.0, a: 255.},
        RGBA{r: 57.0, g: 67.0, b: 136.0, a: 255.},
        RGBA{r: 39.0, g: 44.0, b: 102.0, a: 255.},
        RGBA{r: 22.0, g: 25.0, b: 79.0, a: 255.},
        RGBA{r: 1.0, g: 0.0, b: 52.0, a: 255.},
      ]}
  };
}

lazy_static! {
  pub(crate) static ref ACHROMATOPSIA_CLASSIFIED: PaletteData = {
    PaletteData {
      typ: PaletteType::Div,
      blind: Trivalent::Yes,
      rgb: vec![
        RGBA{r: 0.0, g: 79.0, b: 61.0, a: 255.},
        RGBA{r: 51.0, g: 135.0, b: 150.0, a: 255.},
        RGBA{r: 102.0, g: 164.0, b: 245.0, a: 255.},
        RGBA{r: 54.0, g: 131.0, b: 255.0, a: 255.},
        RGBA{r: 61.0, g: 80.0, b: 202.0, a: 255.},
        RGBA{r: 66.0, g: 28.0, b: 127.0, a: 255.},
        RGBA{r: 41.0, g: 0.0, b: 88.0, a: 255.},
      ]}
  };
}

lazy_static! {
  pub(crate) static ref DEUTERANOPIA_CONTINUOUS: PaletteData = {
    PaletteData {
      typ: PaletteType::Seq,
      blind: Trivalent::Yes,
      rgb: vec![
        RGBA{r: 255.0, g: 250.0, b: 161.0, a: 255.},
        RGBA{r: 244.0, g: 239.0, b: 142.0, a: 255.},
        RGBA{r: 154.0, g: 93.0, b: 103.0, a: 255.},
        RGBA{r: 87.0, g: 63.0, b: 115.0, a: 255.},
        RGBA{r: 55.0, g: 40.0, b: 81.0, a: 255.},
        RGBA{r: 25.0, g: 17.0, b: 53.0, a: 255.},
      ]}
  };
}

lazy_static! {
  pub(crate) static ref DEUTERANOPIA_CLASSIFIED: PaletteData = {
    PaletteData {
      typ: PaletteType::Div,
      blind: Trivalent::Yes,
      rgb: vec![
        RGBA{r: 149.0, g: 166.0, b: 0.0, a: 255.},
        RGBA{r: 146.0, g: 237.0, b: 62.0, a: 255.},
        RGBA{r: 175.0, g: 250.0, b: 197.0, a: 255.},
        RGBA{r: 120.0, g: 255.0, b: 176.0, a: 255.},
        RGBA{r: 105.0, g: 214.0, b: 198.0, a: 255.},
        RGBA{r: 34.0, g: 69.0, b: 156.0, a: 255.},
        RGBA{r: 0.0, g: 14.0, b: 105.0, a: 255.},
      ]}
  };
}

lazy_static! {
  pub(crate) static ref NORMAL_CONTINUOUS: PaletteData = {
    PaletteData {
      typ: PaletteType::Seq,
      blind: Trivalent::Maybe,
      rgb: vec![
        RGBA{r: 255.0, g: 255.0, b: 229.0, a: 255.},
        RGBA{r: 247.0, g: 252.0, b: 185.0, a: 255.},
        RGBA{r: 120.0, g: 198.0, b: 121.0, a: 255.},
        RGBA{r: 65.0, g: 171.0, b: 93.0, a: 255.},
        RGBA{r: 35.0, g: 132.0, b: 67.0, a: 255.},
        RGBA{r: 0.0, g: 90.0, b: 50.0, a: 255.},
      ]}
  };
}

lazy_static! {
  pub(crate) static ref NORMAL_CLASSIFIED: PaletteData = {
    PaletteData {
      typ: PaletteType::Div,
      blind: Trivalent::No,
      rgb: vec![
        RGBA{r: 165.0, g: 0.0, b: 38.0, a: 255.},
        RGBA{r: 237.0, g: 94.0, b: 61.0, a: 255.},
        RGBA{r: 249.0, g: 247.0, b: 174.0, a: 255.},
        RGBA{r: 244.0, g: 255.0, b: 120.0, a: 255.},
        RGBA{r: 158.0, g: 213.0, b: 105.0, a: 255.},
        RGBA{r: 34.0, g: 155.0, b: 81.0, a: 255.},
        RGBA{r: 0.0, g: 104.0, b: 55.0, a: 255.},
      ]}
  };
}

lazy_static! {
  pub(crate) static ref PROTANOPIA_CONTINUOUS: PaletteData = {
    PaletteData {
      typ: PaletteType::Seq,
      blind: Trivalent::Yes,
      rgb: vec![
        RGBA{r: 166.0, g: 246.0, b: 151.0, a: 255.},
        RGBA{r: 125.0, g: 239.0, b: 117.0, a: 255.},
        RGBA{r: 45.0, g: 206.0, b: 187.0, a: 255.},
        RGBA{r: 21.0, g: 151.0, b: 171.0, a: 255.},
        RGBA{r: 12.0, g: 103.0, b: 126.0, a: 255.},
        RGBA{r: 0.0, g: 44.0, b: 71.0, a: 255.},
      ]}
  };
}

lazy_static! {
  pub(crate) static ref PROTANOPIA_CLASSIFIED: PaletteData = {
    PaletteData {
      typ: PaletteType::Div,
      blind: Trivalent::Yes,
      rgb: vec![
        RGBA{r: 149.0, g: 166.0, b: 0.0, a: 255.},
        RGBA{r: 146.0, g: 237.0, b: 62.0, a: 255.},
        RGBA{r: 175.0, g: 250.0, b: 197.0, a: 255.},
        RGBA{r: 120.0, g: 255.0, b: 176.0, a: 255.},
        RGBA{r: 105.0, g: 214.0, b: 198.0, a: 255.},
        RGBA{r: 34.0, g: 69.0, b: 156.0, a: 255.},
        RGBA{r: 0.0, g: 14.0, b: 105.0, a: 255.},
      ]}
  };
}

lazy_static! {
  pub(crate) static ref TRITANOPIA_CONTINUOUS: PaletteData = {
    PaletteData {
      typ: PaletteType::Seq,
      blind: Trivalent::Yes,
      rgb: vec![
        RGBA{r: 205.0, g: 255.0, b: 215.0, a: 255.},
        RGBA{r: 161.0, g: 251.0, b: 182.0, a: 255.},
        RGBA{r: 108.0, g: 181.0, b: 198.0, a: 255.},
        RGBA{r: 58.0, g: 119.0, b: 165.0, a: 255.},
        RGBA{r: 32.0, g: 80.0, b: 128.0, a: 255.},
        RGBA{r: 0.0, g: 23.0, b: 82.0, a: 255.},
      ]}
  };
}

lazy_static! {
  pub(crate) static ref TRITANOPIA_CLASSIFIED: PaletteData = {
    PaletteData {
      typ: PaletteType::Div,
      blind: Trivalent::Yes,
      rgb: vec![
        RGBA{r: 237.0, g: 71.0, b: 0.0, a: 255.},
        RGBA{r: 237.0, g: 138.0, b: 0.0, a: 255.},
        RGBA{r: 225.0, g: 250.0, b: 190.0, a: 255.},
        RGBA{r: 153.0, g: 255.0, b: 148.0, a: 255.},
        RGBA{r: 135.0, g: 190.0, b: 222.0, a: 255.},
        RGBA{r: 46.0, g: 64.0, b: 207.0, a: 255.},
        RGBA{r: 6.0, g: 0.0, b: 188.0, a: 255.},
      ]}
  };
}
