use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::domain::{BranchContext, Version};
use crate::error::Result;
use crate::resolver::{Candidate, Settings};

/// Turns the selected candidate into the final version
pub struct HeightPolicy<'a> {
    settings: &'a Settings,
}

impl<'a> HeightPolicy<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        HeightPolicy { settings }
    }

    /// Calculate the version for `candidate`
    ///
    /// # Arguments
    /// * `candidate` - The candidate chosen by the selector
    /// * `branch` - The checked out branch, used when branch names are included
    /// * `sink` - Receiver for the minimum bump and ignored branch messages
    ///
    /// # Errors
    /// Fails when a release candidate must be bumped past `u64::MAX`.
    pub fn promote(
        &self,
        candidate: &Candidate,
        branch: Option<&str>,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Version> {
        let settings = self.settings;
        let height = if settings.ignore_height {
            0
        } else {
            candidate.height
        };

        let mut version = if height == 0 {
            candidate.version.clone()
        } else if candidate.version.is_release() {
            let bumped = candidate.version.bump(settings.auto_increment)?;
            if settings.ignore_pre_release_identifiers {
                bumped
            } else {
                bumped
                    .with_pre_release(settings.pre_release_identifiers())
                    .with_height(height)
            }
        } else {
            candidate
                .version
                .clone()
                .with_build_metadata(None)
                .with_height(height)
        };

        if let Some(minimum) = settings.minimum_major_minor {
            if version.major_minor() < minimum {
                let mut floored = Version::new(minimum.major, minimum.minor, 0);
                if !settings.ignore_pre_release_identifiers {
                    floored = floored.with_pre_release(settings.pre_release_identifiers());
                    if height > 0 {
                        floored = floored.with_height(height);
                    }
                }

                sink.emit(Diagnostic::BumpedToMinimum {
                    from: version,
                    to: floored.clone(),
                    minimum,
                });
                version = floored;
            }
        }

        if settings.include_branch_name {
            if let Some(name) = branch.filter(|name| !name.is_empty()) {
                let context = BranchContext::new(name);
                if context.is_ignored(&settings.ignore_branch_names) {
                    sink.emit(Diagnostic::IgnoredBranch {
                        branch: context.name,
                    });
                } else if let Some(identifier) = context.identifier() {
                    version.pre_release.push(identifier);
                }
            }
        }

        if let Some(metadata) = settings.build_metadata.as_deref().filter(|m| !m.is_empty()) {
            version.build_metadata = Some(match version.build_metadata.take() {
                Some(existing) => format!("{}.{}", existing, metadata),
                None => metadata.to_string(),
            });
        }

        Ok(version)
    }
}
