//! Match a filename against the configured meta-kernel templates

use crate::core::config::ArchiveConfig;
use crate::core::error::ArchiveResult;
use crate::pattern::metakernel::match_input;
use std::path::Path;

pub fn run_match(config: &ArchiveConfig, filename: &str, json: bool) -> ArchiveResult<()> {
  let input = match_input(Path::new(filename), &config.meta_kernels.templates)?;

  if json {
    println!("{}", serde_json::to_string_pretty(&input)?);
  } else {
    println!("✅ {} matches {}", filename, input.template);
    for (field, value) in input.fields.iter() {
      println!("   {} = {}", field, value);
    }
  }

  Ok(())
}
