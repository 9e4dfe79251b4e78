//! Static fuel-saving tips

use serde::Serialize;

/// A single advisory tip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tip {
    #[serde(rename = "numero")]
    pub rank: u8,
    #[serde(rename = "titulo")]
    pub title: &'static str,
    #[serde(rename = "descricao")]
    pub description: &'static str,
    #[serde(rename = "economia_potencial")]
    pub potential_saving: &'static str,
}

pub const TIPS_TITLE: &str = "7 Dicas para Economizar Combustível";

pub const TIPS_SUMMARY: &str = "Seguindo essas dicas, você pode economizar até 30% no consumo!";

const TIPS: [Tip; 7] = [
    Tip {
        rank: 1,
        title: "Mantenha os pneus calibrados",
        description: "A pressão correta reduz o atrito e economiza até 10% de combustível.",
        potential_saving: "até 10%",
    },
    Tip {
        rank: 2,
        title: "Evite acelerações bruscas",
        description: "Acelere suavemente e mantenha velocidade constante.",
        potential_saving: "até 20%",
    },
    Tip {
        rank: 3,
        title: "Desligue o ar-condicionado quando possível",
        description: "O AC pode aumentar o consumo em até 20%. Use apenas quando necessário.",
        potential_saving: "até 20%",
    },
    Tip {
        rank: 4,
        title: "Não deixe o carro ligado parado",
        description: "Se for ficar parado por mais de 1 minuto, desligue o motor.",
        potential_saving: "variável",
    },
    Tip {
        rank: 5,
        title: "Mantenha a manutenção em dia",
        description: "Troca de óleo, filtros limpos e velas em bom estado melhoram a eficiência.",
        potential_saving: "até 15%",
    },
    Tip {
        rank: 6,
        title: "Retire peso desnecessário do porta-malas",
        description: "Cada 50kg extras aumentam o consumo em até 2%.",
        potential_saving: "até 5%",
    },
    Tip {
        rank: 7,
        title: "Planeje suas rotas",
        description: "Evite horários de trânsito intenso e escolha rotas mais diretas.",
        potential_saving: "até 15%",
    },
];

/// The seven tips, ranked 1 through 7
pub fn static_tips() -> &'static [Tip] {
    &TIPS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seven_tips_in_rank_order() {
        let tips = static_tips();
        assert_eq!(tips.len(), 7);
        for (i, tip) in tips.iter().enumerate() {
            assert_eq!(tip.rank as usize, i + 1);
        }
    }

    #[test]
    fn test_tips_have_no_empty_fields() {
        for tip in static_tips() {
            assert!(!tip.title.is_empty());
            assert!(!tip.description.is_empty());
            assert!(!tip.potential_saving.is_empty());
        }
    }
}
