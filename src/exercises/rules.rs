//! The ten stretching rules, always shown in both languages.

use serde::Serialize;

/// One bilingual rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rule {
    /// Czech text.
    pub cs: &'static str,
    /// English text.
    pub en: &'static str,
}

/// Rules in the order they are presented.
pub const RULES: [Rule; 10] = [
    Rule {
        cs: "Před strečinkem se vždy rozehřejte; studené svaly nestlačujte do krajních poloh.",
        en: "Always warm up first; never force cold muscles into end ranges.",
    },
    Rule {
        cs: "Dodržujte pořadí pozic tak, jak jsou v sešitu za sebou.",
        en: "Follow the order of the illustrated positions.",
    },
    Rule {
        cs: "Do pozice vstupujte i vystupujte pomalu, bez trhání.",
        en: "Enter and exit each position slowly without jerking.",
    },
    Rule {
        cs: "Každou fázi držte alespoň 10 sekund a poté prohlubte ještě na dalších 10 sekund.",
        en: "Hold each phase for at least 10 seconds, then deepen it for another 10 seconds.",
    },
    Rule {
        cs: "Zaměřte se více na strany a svaly, které cítíte jako zkrácené.",
        en: "Spend extra attention on sides and muscles that feel restricted.",
    },
    Rule {
        cs: "Dýchejte přirozeně, nikdy nezadržujte dech.",
        en: "Breathe naturally; never hold your breath.",
    },
    Rule {
        cs: "Asymetrické cviky provádějte na obě strany, abyste udrželi rovnováhu.",
        en: "Perform asymmetrical stretches on both sides to stay balanced.",
    },
    Rule {
        cs: "Ideálně cvičte denně, minimálně však obden; méně než třikrát týdně ztrácí efekt.",
        en: "Practice daily if possible, at least every other day; under three times a week loses effect.",
    },
    Rule {
        cs: "Nikdy nekmitáte ani neskákejte v pozici, zvlášť pokud cítíte diskomfort.",
        en: "Never bounce in a stretch, especially when you feel discomfort.",
    },
    Rule {
        cs: "Pokud ucítíte ostrou nebo přetrvávající bolest, nebo po „lupnutí“, ihned přestaňte.",
        en: "Stop immediately if you feel sharp or lasting pain, or after a “pop.”",
    },
];
