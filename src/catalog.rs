//! Static catalog of known place names offered as typing suggestions.
//!
//! The list is fixed at build time and kept verbatim, including duplicate
//! entries: de-duplicating would change observable suggestion counts.

/// Known places, in catalog order.
pub const PLACES: &[&str] = &[
    "Avenida Goiás",
    "Parque Flamboyant",
    "Setor Bueno",
    "Setor Marista",
    "Setor Sul",
    "Jardim Goiás",
    "Setor Oeste",
    "Parque Areião",
    "Setor Central",
    "Setor Pedro Ludovico",
    "Parque Vaca Brava",
    "Setor Aeroporto",
    "Setor Leste Universitário",
    "Setor Nova Suíça",
    "Jardim América",
    "Setor Marista",
    "Setor Goiânia 2",
    "Setor Campinas",
    "Setor Jardim Botânico",
    "Setor Jardim Novo Mundo",
    "Setor Novo Horizonte",
    "Setor Universitário",
    "Setor Leste",
    "Setor Sudoeste",
    "Parque Lago das Rosas",
    "Praça Cívica",
    "Catedral Metropolitana",
    "Praça do Sol",
    "Setor Bela Vista",
    "Setor Aeroporto",
    "Parque dos Buritis",
    "UniGoias",
];

/// Every catalog entry containing `query` as a case-insensitive substring,
/// in catalog order. Not relevance-ranked. Pure.
///
/// An empty query matches the whole catalog; callers suppress the
/// suggestion list for empty input instead of rendering all entries.
#[must_use]
pub fn matches(query: &str) -> Vec<&'static str> {
    let needle = query.to_lowercase();
    PLACES
        .iter()
        .copied()
        .filter(|place| place.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn catalog_has_thirty_two_entries() {
        assert_eq!(PLACES.len(), 32);
    }

    #[test]
    fn duplicates_are_preserved() {
        let marista = matches("Setor Marista");
        assert_eq!(marista.len(), 2);

        let aeroporto = matches("Setor Aeroporto");
        assert_eq!(aeroporto.len(), 2);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(matches("setor bueno"), vec!["Setor Bueno"]);
        assert_eq!(matches("SETOR BUENO"), vec!["Setor Bueno"]);
        assert_eq!(matches("parque flamboyant"), vec!["Parque Flamboyant"]);
    }

    #[test]
    fn matching_is_substring_not_prefix() {
        assert_eq!(matches("flamboyant"), vec!["Parque Flamboyant"]);
        assert!(matches("vaca").contains(&"Parque Vaca Brava"));
    }

    #[test]
    fn setor_query_returns_catalog_order() {
        let result = matches("Setor");
        let expected: Vec<&str> = PLACES
            .iter()
            .copied()
            .filter(|p| p.to_lowercase().contains("setor"))
            .collect();
        assert_eq!(result, expected);
        assert_eq!(result.first(), Some(&"Setor Bueno"));
    }

    #[test]
    fn empty_query_matches_everything() {
        assert_eq!(matches(""), PLACES.to_vec());
    }

    #[test]
    fn unknown_query_matches_nothing() {
        assert!(matches("Copacabana").is_empty());
        assert!(matches("Latitude: 10, Longitude: 20").is_empty());
    }

    proptest! {
        #[test]
        fn every_match_contains_the_query(query in "[a-zA-Záéíóúâê ]{0,12}") {
            let needle = query.to_lowercase();
            for place in matches(&query) {
                prop_assert!(place.to_lowercase().contains(&needle));
            }
        }

        #[test]
        fn matches_preserve_catalog_order(query in "[a-zA-Z ]{0,8}") {
            let result = matches(&query);
            let mut positions = Vec::with_capacity(result.len());
            let mut from = 0;
            for entry in &result {
                let pos = PLACES[from..]
                    .iter()
                    .position(|p| p == entry)
                    .map(|p| p + from);
                prop_assert!(pos.is_some());
                from = pos.unwrap() + 1;
                positions.push(pos.unwrap());
            }
            let mut sorted = positions.clone();
            sorted.sort_unstable();
            prop_assert_eq!(positions, sorted);
        }
    }
}
