// Skill-gap chart rendering.
// Produces PNG rasters; captions are drawn by the PDF assembler from `ChartBar` geometry.

pub mod builder;

pub use builder::{build_charts, SkillGapChart};
