//! Macros for ergonomic machine construction.

/// Build a [`TransitionMapping`](crate::core::TransitionMapping) from nested literals.
///
/// # Example
///
/// ```
/// use finite_machines::transition_mapping;
///
/// let mapping = transition_mapping! {
///     "Q0" => { "S" => "S1", "L" => "Q0" },
///     "S1" => { "S" => "S1", "L" => "Q0" },
/// };
///
/// assert_eq!(mapping["Q0"]["S"], "S1");
/// assert_eq!(mapping.len(), 2);
/// ```
#[macro_export]
macro_rules! transition_mapping {
    (
        $(
            $state:expr => {
                $($input:expr => $target:expr),* $(,)?
            }
        ),* $(,)?
    ) => {{
        #[allow(unused_mut)]
        let mut mapping = $crate::core::TransitionMapping::new();
        $(
            #[allow(unused_mut)]
            let mut row = ::std::collections::BTreeMap::new();
            $(
                row.insert(
                    ::std::string::String::from($input),
                    ::std::string::String::from($target),
                );
            )*
            mapping.insert(::std::string::String::from($state), row);
        )*
        mapping
    }};
}
