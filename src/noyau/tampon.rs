// src/noyau/tampon.rs
//
// Machine de saisie : une touche -> une mutation du tampon.
//
// Contrats :
// - le texte n’est jamais vide ; l’état "vide" canonique est "0"
// - deux états : Composition (initial) et ResultatAffiche
// - une touche refusée laisse le tampon strictement intact
// - l’évaluation ne modifie jamais le tampon en cas d’échec partiel :
//   soit le résultat complet, soit le marqueur d’erreur

use super::erreur::ErreurEval;
use super::eval::evaluer;
use super::format::{normaliser, rendre, CHIFFRES_SIGNIFICATIFS};
use super::touches::{Fonction, Operateur, Parenthese, Touche, PI};

/// Texte vide canonique.
pub const ZERO: &str = "0";

/// Marqueur affiché après un échec d’évaluation.
pub const MARQUEUR_ERREUR: &str = "Error";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Etat {
    Composition,
    ResultatAffiche,
}

/// Ce qu’a produit une touche (journal / historique).
#[derive(Clone, Debug, PartialEq)]
pub enum Issue {
    /// Touche refusée : tampon inchangé.
    Refusee,
    /// Tampon modifié (ou laissé tel quel par une règle sans effet visible).
    Acceptee,
    /// Évaluation terminale réussie.
    Resultat { expression: String, valeur: f64 },
    /// Évaluation (terminale ou pourcent) échouée.
    Echec(ErreurEval),
}

/// Tampon d’expression : seule source de vérité de la calculatrice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tampon {
    texte: String,
    resultat_affiche: bool,
    // la touche précédente était une fonction acceptée ("nom(" déjà écrit)
    appel_ouvert: bool,
}

impl Default for Tampon {
    fn default() -> Self {
        Self {
            texte: ZERO.to_string(),
            resultat_affiche: false,
            appel_ouvert: false,
        }
    }
}

fn est_operateur(c: char) -> bool {
    Operateur::depuis_glyphe(c).is_some()
}

fn est_constante(c: char) -> bool {
    c == PI
}

impl Tampon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tampon "résultat affiché" (ex: rappel depuis l’historique).
    pub fn avec_resultat(texte: impl Into<String>) -> Self {
        let texte = texte.into();
        Self {
            texte: if texte.is_empty() { ZERO.to_string() } else { texte },
            resultat_affiche: true,
            appel_ouvert: false,
        }
    }

    pub fn texte(&self) -> &str {
        &self.texte
    }

    pub fn resultat_affiche(&self) -> bool {
        self.resultat_affiche
    }

    pub fn etat(&self) -> Etat {
        if self.resultat_affiche {
            Etat::ResultatAffiche
        } else {
            Etat::Composition
        }
    }

    fn dernier(&self) -> Option<char> {
        self.texte.chars().next_back()
    }

    /// "0" ou résultat affiché : la prochaine saisie remplace le tampon.
    fn doit_remplacer(&self) -> bool {
        self.resultat_affiche || self.texte == ZERO
    }

    fn remplacer(&mut self, texte: impl Into<String>) {
        self.texte = texte.into();
        self.resultat_affiche = false;
    }

    /// Point d’entrée unique : applique une touche.
    ///
    /// Un "(" tapé juste après une touche fonction est absorbé : "nom(" est
    /// déjà ouvert ("sin" "(" "9" "0" ")" donne "sin(90)"). Un second "("
    /// s’ajoute normalement ("sin((").
    pub fn appliquer(&mut self, touche: Touche) -> Issue {
        let appel_ouvert = std::mem::take(&mut self.appel_ouvert);
        let issue = match touche {
            Touche::Parenthese(Parenthese::Ouvrante) if appel_ouvert => Issue::Acceptee,
            Touche::Nombre(c) => self.saisir_nombre(c),
            Touche::Operateur(op) => self.saisir_operateur(op),
            Touche::Fonction(f) => self.saisir_fonction(f),
            Touche::Parenthese(p) => self.saisir_parenthese(p),
            Touche::Decimale => self.saisir_decimale(),
            Touche::Effacer => {
                self.effacer();
                Issue::Acceptee
            }
            Touche::Retour => {
                self.retour();
                Issue::Acceptee
            }
            Touche::Pourcent => self.pourcent(),
            Touche::Calculer => self.calculer(),
        };
        self.appel_ouvert = matches!(touche, Touche::Fonction(_)) && issue == Issue::Acceptee;

        tracing::debug!(
            %touche,
            texte = %self.texte,
            etat = ?self.etat(),
            issue = ?issue,
            "touche"
        );
        issue
    }

    /// Chiffre ou constante.
    pub fn saisir_nombre(&mut self, c: char) -> Issue {
        if self.doit_remplacer() {
            self.remplacer(c.to_string());
            return Issue::Acceptee;
        }
        match self.dernier() {
            Some(d) if est_constante(d) || d == ')' => Issue::Refusee,
            _ => {
                self.texte.push(c);
                Issue::Acceptee
            }
        }
    }

    /// Opérateur : jamais deux opérateurs empilés, sauf le moins unaire.
    pub fn saisir_operateur(&mut self, op: Operateur) -> Issue {
        // Après une erreur, on repart de zéro plutôt que de composer "Error+".
        if self.resultat_affiche && self.texte == MARQUEUR_ERREUR {
            self.texte = ZERO.to_string();
        }
        self.resultat_affiche = false;

        let g = op.glyphe();
        match self.dernier() {
            // moins unaire : "5×-", "2^-", "5+-" (mais jamais "--")
            Some(d) if op == Operateur::Moins && est_operateur(d) && d != '-' => {
                self.texte.push(g);
            }
            Some(d) if est_operateur(d) => {
                // remplace toute la traîne d’opérateurs ("5×-" + "+" -> "5+")
                while self.dernier().is_some_and(est_operateur) {
                    self.texte.pop();
                }
                if self.texte.is_empty() {
                    self.texte.push_str(ZERO);
                }
                self.texte.push(g);
            }
            _ => self.texte.push(g),
        }
        Issue::Acceptee
    }

    /// Fonction : écrit "nom(" ; seulement après un opérateur ou "(".
    pub fn saisir_fonction(&mut self, f: Fonction) -> Issue {
        let appel = format!("{}(", f.nom());
        if self.doit_remplacer() {
            self.remplacer(appel);
            return Issue::Acceptee;
        }
        match self.dernier() {
            Some(d) if est_operateur(d) || d == '(' => {
                self.texte.push_str(&appel);
                Issue::Acceptee
            }
            _ => Issue::Refusee,
        }
    }

    pub fn saisir_parenthese(&mut self, p: Parenthese) -> Issue {
        if self.doit_remplacer() {
            self.remplacer(p.glyphe().to_string());
        } else {
            self.texte.push(p.glyphe());
        }
        Issue::Acceptee
    }

    /// Segment numérique en cours : la traîne de chiffres/points, recalculée
    /// à chaque frappe (jamais mise en cache).
    fn segment_courant(&self) -> &str {
        let debut = self
            .texte
            .char_indices()
            .rev()
            .find(|&(_, c)| !(c.is_ascii_digit() || c == '.'))
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        &self.texte[debut..]
    }

    /// Point décimal : un seul par segment numérique, ajouté tel quel
    /// ("5+" + "." -> "5+." ; ".5" se lit comme 0.5).
    pub fn saisir_decimale(&mut self) -> Issue {
        if self.resultat_affiche {
            self.remplacer("0.");
            return Issue::Acceptee;
        }
        if self.segment_courant().contains('.') {
            return Issue::Refusee;
        }
        self.texte.push('.');
        Issue::Acceptee
    }

    pub fn effacer(&mut self) {
        *self = Self::default();
    }

    /// Retour arrière : jamais d’édition d’un résultat affiché.
    pub fn retour(&mut self) {
        if self.resultat_affiche {
            self.effacer();
            return;
        }
        self.texte.pop();
        if self.texte.is_empty() {
            self.texte.push_str(ZERO);
        }
    }

    /// Pourcent : transformation (résultat / 100), pas une évaluation terminale.
    /// Le drapeau "résultat affiché" n’est pas touché ; échec => tampon intact.
    pub fn pourcent(&mut self) -> Issue {
        let r = evaluer(&self.texte)
            .and_then(|v| normaliser(v / 100.0, CHIFFRES_SIGNIFICATIFS));
        match r {
            Ok(v) => {
                self.texte = rendre(v);
                Issue::Acceptee
            }
            Err(e) => {
                tracing::warn!(texte = %self.texte, erreur = %e, "pourcent refusé");
                Issue::Echec(e)
            }
        }
    }

    /// Évaluation terminale (idempotente sur un résultat affiché).
    pub fn calculer(&mut self) -> Issue {
        if self.resultat_affiche {
            return Issue::Acceptee;
        }
        let expression = std::mem::take(&mut self.texte);
        self.resultat_affiche = true;

        match evaluer(&expression) {
            Ok(valeur) => {
                self.texte = rendre(valeur);
                Issue::Resultat { expression, valeur }
            }
            Err(e) => {
                tracing::warn!(%expression, erreur = %e, "évaluation échouée");
                self.texte = MARQUEUR_ERREUR.to_string();
                Issue::Echec(e)
            }
        }
    }
}
