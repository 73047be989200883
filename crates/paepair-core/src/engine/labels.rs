use super::config::ChainLabeling;
use super::error::AnalysisError;

pub const NAME_SEPARATOR: char = '_';

/// Produces one label per chain.
///
/// Positional labels are the chain indices. Name-fragment labels take the `_`-separated
/// fragments of `name` in order, so a prediction named `KinA_KinA_Adapt` labels its
/// three chains `KinA`, `KinA` and `Adapt`.
///
/// # Errors
///
/// Returns [`AnalysisError::Labeling`] if `name` has fewer fragments than there are chains.
pub fn chain_labels(
    labeling: ChainLabeling,
    chain_count: usize,
    name: &str,
) -> Result<Vec<String>, AnalysisError> {
    match labeling {
        ChainLabeling::Positional => Ok((0..chain_count).map(|i| i.to_string()).collect()),
        ChainLabeling::NameFragments => {
            let fragments: Vec<&str> = name.split(NAME_SEPARATOR).collect();
            if fragments.len() < chain_count {
                return Err(AnalysisError::Labeling {
                    needed: chain_count,
                    available: fragments.len(),
                    name: name.to_string(),
                });
            }
            Ok(fragments
                .into_iter()
                .take(chain_count)
                .map(str::to_string)
                .collect())
        }
    }
}
