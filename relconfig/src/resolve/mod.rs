//! Release resolution.
//!
//! Resolution runs in two phases. Directories are merged into a
//! [`LoadContext`] in precedence order, which is then frozen into
//! [`ReleaseConfigs`]. Each release is resolved against the frozen context by
//! walking its inheritance graph and applying contributions in order:
//!
//! 1. every inherited release, depth-first and left-to-right, each release
//!    before the releases that inherit it;
//! 2. the release's own contributions, in directory-index order.
//!
//! Every flag starts from its declared default and each applied value is
//! appended to its trail, so the last applied value wins.
//!
//! # Examples
//!
//! ```
//! use relconfig::loader::{MemoryDirectory, MemorySource};
//! use relconfig::{Container, ReleaseConfigs, Value};
//!
//! let mut source = MemorySource::new();
//! let map = source.add(
//!     MemoryDirectory::new("build/release", Some(Container::All))
//!         .declare("RELEASE_FOO", Value::Unspecified)
//!         .release("base", &[])
//!         .release("trunk", &["base"])
//!         .value("base", "RELEASE_FOO", Value::String("v1".into()))
//!         .value("trunk", "RELEASE_FOO", Value::String("v2".into())),
//! );
//!
//! let configs = ReleaseConfigs::load(&source, &[map], false).unwrap();
//! let flag = configs.resolve("trunk").unwrap().flag("RELEASE_FOO").cloned().unwrap();
//! let trail: Vec<_> = flag.traces().iter().map(|t| t.value.clone()).collect();
//! assert_eq!(
//!     trail,
//!     vec![Value::Unspecified, Value::String("v1".into()), Value::String("v2".into())]
//! );
//! ```

mod context;
mod engine;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use context::{LoadContext, ReleaseConfigs};
pub use engine::ResolvedRelease;
