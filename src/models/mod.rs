// ============================================================================
// MODELS - MODULE PRINCIPAL
// ============================================================================
//
// Description:
//   Point d'entrée pour tous les modèles de données.
//   Chaque entité correspond à une table SQLite gérée avec SeaORM.
//
// Liste des modules:
//   - users : Utilisateurs (email unique, plan free/pro)
//   - wallets : Lieux de conservation (exchange/wallet) avec solde EUR en cache
//   - transactions : Achats, ventes et transferts d'un wallet
//   - dto : Data Transfer Objects pour les requêtes/réponses API
//   - health : Réponses de / et /health
//
// Points d'attention:
//   - Le wallet d'une transaction doit appartenir au même utilisateur,
//     c'est vérifié dans TransactionService::create (pas de contrainte SQL)
//   - fifo_lot_id existe dans le schéma mais n'est jamais rempli
//
// ============================================================================

pub mod dto;
pub mod health;
pub mod transactions;
pub mod users;
pub mod wallets;
