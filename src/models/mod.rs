use rust_decimal::{Decimal, RoundingStrategy};

pub mod court;
pub mod reservation;
pub mod time;
pub mod user;

/// Formats a peso amount for display: Colombian-peso style, thousands
/// separated by `.`, no fractional digits (`$ 20.000`).
pub fn formato_cop(valor: Decimal) -> String {
    let entero = valor
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_string();
    let mut agrupado = String::with_capacity(entero.len() + entero.len() / 3);
    let digitos: Vec<char> = entero.chars().collect();
    for (i, c) in digitos.iter().enumerate() {
        if i > 0 && (digitos.len() - i) % 3 == 0 {
            agrupado.push('.');
        }
        agrupado.push(*c);
    }
    format!("$ {agrupado}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agrupa_miles_con_punto() {
        assert_eq!(formato_cop(Decimal::from(20000)), "$ 20.000");
        assert_eq!(formato_cop(Decimal::from(1500)), "$ 1.500");
        assert_eq!(formato_cop(Decimal::from(1500000)), "$ 1.500.000");
    }

    #[test]
    fn montos_cortos_sin_separador() {
        assert_eq!(formato_cop(Decimal::from(0)), "$ 0");
        assert_eq!(formato_cop(Decimal::from(999)), "$ 999");
    }

    #[test]
    fn redondea_al_peso() {
        assert_eq!(formato_cop(Decimal::new(15015, 1)), "$ 1.502");
    }
}
