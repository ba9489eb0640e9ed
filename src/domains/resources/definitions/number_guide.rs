//! Static guide to the numeric input formats.

use super::ResourceDefinition;
use crate::domains::resources::service::ResourceContent;

pub struct NumberGuideResource;

const GUIDE: &str = r#"# Numeric input guide

## Base converter (`base_convert`)

| Base | Digits    |
|------|-----------|
| bin  | 0-1       |
| oct  | 0-7       |
| dec  | 0-9       |
| hex  | 0-9, A-F  |

- Values are non-negative integers of any size, written without prefix,
  sign or whitespace.
- Hex digits may be lower case; hex output is upper case.
- An empty value clears every field.
- An invalid value stays in the edited field; the other fields keep their
  previous values (pass them back as `previous`).

## Unit converter (`unit_convert`)

- length: m, km, cm, mm, ft, in, yd, mi
- weight: kg, g, mg, lb, oz, st
- temperature: c, f, k
- data: b, kb, mb, gb, tb, pb (multiples of 1024)

Switching category resets the value to 1 and selects the first two units.

## Statistics (`statistics`)

Tokens are split on the chosen delimiter (comma, space, newline or
semicolon); comma, space and semicolon also split on any whitespace. Each
token contributes its leading number (`12px` counts as 12, `abc` is
skipped). Variance and standard deviation are population statistics
(divided by n).
"#;

impl ResourceDefinition for NumberGuideResource {
    const URI: &'static str = "devtools://guides/numbers";
    const NAME: &'static str = "Numeric Input Guide";
    const DESCRIPTION: &'static str =
        "Accepted input formats of the base converter, unit converter and statistics tools";
    const MIME_TYPE: &'static str = "text/markdown";

    fn content() -> ResourceContent {
        ResourceContent::Text(GUIDE)
    }
}
