use lab_extract::MarkerExtractor;
use lab_model::MarkerDefinition;
use lab_standards::load_default_marker_definitions;
use proptest::prelude::*;

fn definitions() -> Vec<MarkerDefinition> {
    load_default_marker_definitions().expect("load marker definitions")
}

fn value_strategy() -> impl Strategy<Value = f64> {
    (0u32..100_000u32).prop_map(|hundredths| f64::from(hundredths) / 100.0)
}

proptest! {
    #[test]
    fn every_marker_name_extracts_its_value(
        index in 0usize..38,
        value in value_strategy(),
    ) {
        let definitions = definitions();
        let definition = &definitions[index % definitions.len()];
        let extractor = MarkerExtractor::new(&definitions).unwrap();
        let transcript = format!("{}: {}", definition.name, value);
        let extraction = extractor.extract(&transcript);
        prop_assert_eq!(extraction.markers.value_of(&definition.name), Some(value));
        prop_assert!(extraction.warnings.is_empty());
    }

    #[test]
    fn full_panel_extracts_every_marker(
        values in proptest::collection::vec(value_strategy(), 38),
    ) {
        let definitions = definitions();
        let extractor = MarkerExtractor::new(&definitions).unwrap();
        let transcript = definitions
            .iter()
            .zip(&values)
            .map(|(definition, value)| format!("{}: {}", definition.name, value))
            .collect::<Vec<_>>()
            .join("\n");
        let extraction = extractor.extract(&transcript);
        prop_assert_eq!(extraction.markers.len(), definitions.len());
        for (definition, value) in definitions.iter().zip(&values) {
            prop_assert_eq!(extraction.markers.value_of(&definition.name), Some(*value));
        }
    }
}
