//! Version and commit metadata captured at build time by `built`.

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes, dead_code)]
mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[must_use]
pub fn version() -> &'static str {
    built_info::PKG_VERSION
}
