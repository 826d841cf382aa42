//! The realm store: one authoritative shared session.
//!
//! [`RealmStore`] owns the roster, the chat log, the packet dispatcher and
//! a read-only handle to the definition catalog. All mutation goes
//! through `&mut self`, so the single-writer discipline is the borrow
//! checker's to enforce; a multi-threaded host wraps the store in one
//! session-wide mutex.
//!
//! Every operation validates its inputs before touching state. A lookup,
//! parse or configuration failure leaves the store exactly as it was.

use std::sync::Arc;

use realm_bridge::{
    CharacterEntity, Definition, DefinitionCatalog, ItemEntity, from_character_record,
    from_item_record, to_character_record, to_item_record, validate_character_record,
    validate_item_record,
};
use realm_types::{
    CharacterRecord, FORMAT_VERSION, ItemRecord, Packet, Participant, ParticipantId,
    RealmSnapshot,
};
use serde_json::Value;
use tracing::{debug, info};

use crate::chat::{ChatLog, ChatMessage};
use crate::dispatch::{Delivery, DeliveryReport, Dispatcher};
use crate::error::{DispatchError, ParseError, RealmError};
use crate::roster::Roster;

/// Result of [`RealmStore::connect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    /// The participant after connecting.
    pub participant: Participant,
    /// Whether an existing participant was reconnected rather than added.
    pub rejoined: bool,
}

/// Roster, chat log and dispatch for one session.
#[derive(Debug)]
pub struct RealmStore {
    roster: Roster,
    chat: ChatLog,
    dispatcher: Dispatcher<Packet>,
    catalog: Arc<DefinitionCatalog>,
}

impl RealmStore {
    /// An empty realm with no delivery registered yet.
    pub const fn new(catalog: Arc<DefinitionCatalog>) -> Self {
        Self {
            roster: Roster::new(),
            chat: ChatLog::new(),
            dispatcher: Dispatcher::unconfigured(),
            catalog,
        }
    }

    /// An empty realm delivering through `delivery`.
    pub fn with_delivery(
        catalog: Arc<DefinitionCatalog>,
        delivery: Arc<dyn Delivery<Packet>>,
    ) -> Self {
        let mut realm = Self::new(catalog);
        realm.register_delivery(delivery);
        realm
    }

    /// Register (or replace) the transport delivery.
    pub fn register_delivery(&mut self, delivery: Arc<dyn Delivery<Packet>>) {
        self.dispatcher.register(delivery);
    }

    /// The roster.
    pub const fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The chat log.
    pub const fn chat(&self) -> &ChatLog {
        &self.chat
    }

    /// The definition catalog.
    pub fn catalog(&self) -> &DefinitionCatalog {
        &self.catalog
    }

    // -----------------------------------------------------------------------
    // Roster
    // -----------------------------------------------------------------------

    /// Add a participant to the roster without announcing it.
    ///
    /// # Errors
    ///
    /// Returns [`RealmError::IdsExhausted`] if no further id can be
    /// allocated.
    pub fn add_participant(
        &mut self,
        name: impl Into<String>,
        hashed_key: impl Into<String>,
    ) -> Result<Participant, RealmError> {
        Ok(self.roster.add(name, hashed_key)?)
    }

    /// Reconnect the participant matching `name` and `hashed_key`, or add
    /// a new one.
    ///
    /// Nothing is announced; see [`announce`](Self::announce).
    pub fn connect(&mut self, name: &str, hashed_key: &str) -> Result<Connection, RealmError> {
        let existing = self.roster.authenticate(name, hashed_key).map(|p| p.id);

        let connection = match existing {
            Some(id) => {
                let participant = self.roster.set_connected(id, true)?.clone();
                info!(id = %participant.id, name = %participant.name, "Participant reconnected");
                Connection {
                    participant,
                    rejoined: true,
                }
            }
            None => Connection {
                participant: self.roster.add(name, hashed_key)?,
                rejoined: false,
            },
        };
        Ok(connection)
    }

    /// Tell everyone but the participant about its arrival.
    ///
    /// Newcomers are announced as joined; returning participants as a
    /// status change.
    pub fn announce(&self, connection: &Connection) -> Result<DeliveryReport, RealmError> {
        let participant = connection.participant.summary();
        let packet = if connection.rejoined {
            Packet::ParticipantStatus { participant }
        } else {
            Packet::ParticipantJoined { participant }
        };
        self.broadcast_except(&packet, connection.participant.id)
    }

    /// Flip the connectivity flag and tell everyone else.
    ///
    /// The roster entry is kept either way.
    pub fn set_connected(
        &mut self,
        id: ParticipantId,
        connected: bool,
    ) -> Result<DeliveryReport, RealmError> {
        self.ensure_configured()?;
        let participant = self.roster.set_connected(id, connected)?.summary();
        info!(id = %id, connected, "Participant connectivity changed");
        self.broadcast_except(&Packet::ParticipantStatus { participant }, id)
    }

    /// Flip the in-session flag and tell everyone else.
    pub fn set_in_game(
        &mut self,
        id: ParticipantId,
        in_game: bool,
    ) -> Result<DeliveryReport, RealmError> {
        self.ensure_configured()?;
        let participant = self.roster.set_in_game(id, in_game)?.summary();
        debug!(id = %id, in_game, "Participant session flag changed");
        self.broadcast_except(&Packet::ParticipantStatus { participant }, id)
    }

    // -----------------------------------------------------------------------
    // Chat
    // -----------------------------------------------------------------------

    /// Append a message and broadcast it to the whole roster, author
    /// included.
    ///
    /// The author and the delivery are checked before the log is touched.
    pub fn post_message(
        &mut self,
        author: ParticipantId,
        text: impl Into<String>,
    ) -> Result<(ChatMessage, DeliveryReport), RealmError> {
        self.roster.find(author)?;
        self.ensure_configured()?;

        let message = ChatMessage {
            user: author,
            message: text.into(),
        };
        self.chat.append(message.clone());
        debug!(author = %author, total = self.chat.len(), "Message posted");

        let report = self.broadcast(&Packet::Chat {
            message: message.to_record(),
        })?;
        Ok((message, report))
    }

    /// Decode a raw message record against this realm's roster.
    pub fn decode_message(&self, raw: &Value) -> Result<ChatMessage, RealmError> {
        Ok(ChatMessage::from_raw(&self.roster, raw)?)
    }

    // -----------------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------------

    /// Deliver a packet to one participant.
    pub fn notify(&self, id: ParticipantId, packet: &Packet) -> Result<(), RealmError> {
        let participant = self.roster.find(id)?;
        self.dispatcher.notify(participant, packet)?;
        Ok(())
    }

    /// Deliver a packet to every participant in roster order.
    pub fn broadcast(&self, packet: &Packet) -> Result<DeliveryReport, RealmError> {
        debug!(kind = packet.kind(), "Broadcasting packet");
        Ok(self.dispatcher.broadcast(self.roster.iter(), packet)?)
    }

    /// Deliver a packet to every participant except `excluded`.
    pub fn broadcast_except(
        &self,
        packet: &Packet,
        excluded: ParticipantId,
    ) -> Result<DeliveryReport, RealmError> {
        debug!(kind = packet.kind(), excluded = %excluded, "Broadcasting packet");
        Ok(self
            .dispatcher
            .broadcast_except(self.roster.iter(), packet, excluded)?)
    }

    /// Send the full public state of the realm to one participant.
    pub fn sync_participant(&self, id: ParticipantId) -> Result<(), RealmError> {
        self.notify(id, &self.sync_packet())
    }

    /// The packet [`sync_participant`](Self::sync_participant) sends.
    pub fn sync_packet(&self) -> Packet {
        Packet::RealmSync {
            version: FORMAT_VERSION.to_owned(),
            participants: self.roster.summaries(),
            chat: self.chat.records(),
        }
    }

    // -----------------------------------------------------------------------
    // Transfers
    // -----------------------------------------------------------------------

    /// Snapshot a live item and deliver it to `to`.
    pub fn send_item<E: ItemEntity + ?Sized>(
        &self,
        from: ParticipantId,
        to: ParticipantId,
        item: &E,
    ) -> Result<(), RealmError> {
        self.forward_item(from, to, to_item_record(item))
    }

    /// Validate an item record and deliver it to `to`.
    ///
    /// A record naming an unknown definition never leaves the realm.
    pub fn forward_item(
        &self,
        from: ParticipantId,
        to: ParticipantId,
        item: ItemRecord,
    ) -> Result<(), RealmError> {
        self.roster.find(from)?;
        validate_item_record(&item, &self.catalog)?;
        debug!(from = %from, to = %to, thing = %item.thing_def_label, "Forwarding item");
        self.notify(to, &Packet::ItemTransfer { from, item })
    }

    /// Rebuild a live item from a received record.
    pub fn receive_item<E, F>(&self, record: &ItemRecord, instantiate: F) -> Result<E, RealmError>
    where
        E: ItemEntity,
        F: FnOnce(&Definition, Option<&Definition>) -> E,
    {
        Ok(from_item_record(record, &self.catalog, instantiate)?)
    }

    /// Snapshot a live character and deliver it to `to`.
    pub fn send_character<E: CharacterEntity + ?Sized>(
        &self,
        from: ParticipantId,
        to: ParticipantId,
        character: &E,
    ) -> Result<(), RealmError> {
        self.forward_character(from, to, to_character_record(character))
    }

    /// Validate a character record and deliver it to `to`.
    pub fn forward_character(
        &self,
        from: ParticipantId,
        to: ParticipantId,
        character: CharacterRecord,
    ) -> Result<(), RealmError> {
        self.roster.find(from)?;
        validate_character_record(&character, &self.catalog)?;
        debug!(from = %from, to = %to, skills = character.skills.len(), "Forwarding character");
        self.notify(to, &Packet::CharacterTransfer { from, character })
    }

    /// Rebuild a live character from a received record.
    pub fn receive_character<E, F>(
        &self,
        record: &CharacterRecord,
        instantiate: F,
    ) -> Result<E, RealmError>
    where
        E: CharacterEntity,
        F: FnOnce() -> E,
    {
        Ok(from_character_record(record, &self.catalog, instantiate)?)
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Capture the whole realm for storage.
    pub fn snapshot(&self) -> RealmSnapshot {
        RealmSnapshot {
            version: FORMAT_VERSION.to_owned(),
            users: self.roster.as_slice().to_vec(),
            chat: self.chat.records(),
            last_user_given_id: self.roster.last_given_id(),
        }
    }

    /// Rebuild a realm from a snapshot.
    ///
    /// Nobody is connected in a freshly restored realm, and no delivery
    /// is registered.
    ///
    /// # Errors
    ///
    /// Returns [`RealmError::VersionMismatch`] for a snapshot from another
    /// format revision and [`RealmError::CorruptSnapshot`] if ids are not
    /// strictly increasing, exceed the allocator position, or a chat
    /// message references an unknown participant.
    pub fn restore(
        snapshot: RealmSnapshot,
        catalog: Arc<DefinitionCatalog>,
    ) -> Result<Self, RealmError> {
        if snapshot.version != FORMAT_VERSION {
            return Err(RealmError::VersionMismatch {
                expected: FORMAT_VERSION.to_owned(),
                found: snapshot.version,
            });
        }

        let mut previous = 0_u64;
        for user in &snapshot.users {
            let id = user.id.into_inner();
            if id <= previous {
                return Err(RealmError::CorruptSnapshot(format!(
                    "participant id {id} does not follow {previous}"
                )));
            }
            if id > snapshot.last_user_given_id {
                return Err(RealmError::CorruptSnapshot(format!(
                    "participant id {id} exceeds last given id {}",
                    snapshot.last_user_given_id
                )));
            }
            previous = id;
        }

        let mut users = snapshot.users;
        for user in &mut users {
            user.connected = false;
        }
        let roster = Roster::from_parts(users, snapshot.last_user_given_id);

        let mut chat = ChatLog::new();
        for record in snapshot.chat {
            let message = ChatMessage::from_record(&roster, record).map_err(|err| match err {
                ParseError::Unresolved(missing) => {
                    RealmError::CorruptSnapshot(format!(
                        "chat references unknown participant {}",
                        missing.0
                    ))
                }
                other @ ParseError::Malformed(_) => RealmError::Parse(other),
            })?;
            chat.append(message);
        }

        info!(
            participants = roster.len(),
            messages = chat.len(),
            last_given_id = roster.last_given_id(),
            "Realm restored"
        );

        Ok(Self {
            roster,
            chat,
            dispatcher: Dispatcher::unconfigured(),
            catalog,
        })
    }

    fn ensure_configured(&self) -> Result<(), RealmError> {
        if self.dispatcher.is_configured() {
            Ok(())
        } else {
            Err(DispatchError::Unconfigured.into())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use std::sync::Mutex;

    use realm_bridge::{BridgeError, PlainCharacter, PlainItem};
    use realm_types::{MessageRecord, QualityCategory, SkillRecord};
    use serde_json::json;

    use super::*;
    use crate::roster::NotFound;

    type Sent = Arc<Mutex<Vec<(ParticipantId, Packet)>>>;

    fn catalog() -> Arc<DefinitionCatalog> {
        Arc::new(
            DefinitionCatalog::from_definitions([
                Definition::thing("club").with_quality(),
                Definition::stuff("wood"),
                Definition::skill("shooting"),
            ])
            .unwrap(),
        )
    }

    fn recording_realm() -> (RealmStore, Sent) {
        let sent = Sent::default();
        let log = Arc::clone(&sent);
        let delivery: Arc<dyn Delivery<Packet>> =
            Arc::new(move |participant: &Participant, packet: &Packet| {
                log.lock().unwrap().push((participant.id, packet.clone()));
                Ok(())
            });
        (RealmStore::with_delivery(catalog(), delivery), sent)
    }

    fn recipients(sent: &Sent) -> Vec<u64> {
        sent.lock()
            .unwrap()
            .iter()
            .map(|(id, _)| id.into_inner())
            .collect()
    }

    #[test]
    fn alice_and_bob_chat_scenario() {
        let (mut realm, _) = recording_realm();
        let alice = realm.add_participant("Alice", "h1").unwrap();
        let bob = realm.add_participant("Bob", "h2").unwrap();
        assert_eq!(alice.id, ParticipantId(1));
        assert_eq!(bob.id, ParticipantId(2));

        let (message, _) = realm.post_message(alice.id, "hello").unwrap();
        assert_eq!(
            realm.chat().records(),
            vec![MessageRecord {
                user: ParticipantId(1),
                message: String::from("hello"),
            }]
        );

        let raw = message.to_raw().unwrap();
        assert_eq!(serde_json::to_string(&raw).unwrap(), r#"{"user":1,"message":"hello"}"#);

        let decoded = realm.decode_message(&raw).unwrap();
        assert_eq!(decoded.user, alice.id);
        assert_eq!(realm.roster().find(decoded.user).unwrap().name, "Alice");
    }

    #[test]
    fn post_message_broadcasts_once_to_everyone() {
        let (mut realm, sent) = recording_realm();
        let a = realm.add_participant("A", "ha").unwrap().id;
        realm.add_participant("B", "hb").unwrap();

        let (_, report) = realm.post_message(a, "hi").unwrap();
        assert_eq!(realm.chat().len(), 1);
        assert_eq!(recipients(&sent), vec![1, 2]);
        assert!(report.is_complete());
        assert!(
            sent.lock()
                .unwrap()
                .iter()
                .all(|(_, packet)| matches!(packet, Packet::Chat { message } if message.message == "hi"))
        );
    }

    #[test]
    fn post_from_unknown_author_leaves_log_untouched() {
        let (mut realm, sent) = recording_realm();
        let err = realm.post_message(ParticipantId(4), "boo").unwrap_err();
        assert!(matches!(err, RealmError::NotFound(NotFound(ParticipantId(4)))));
        assert!(realm.chat().is_empty());
        assert!(sent.lock().unwrap().is_empty());
    }

    #[test]
    fn post_without_delivery_leaves_log_untouched() {
        let mut realm = RealmStore::new(catalog());
        let alice = realm.add_participant("Alice", "h1").unwrap().id;
        let err = realm.post_message(alice, "hello").unwrap_err();
        assert!(matches!(err, RealmError::Dispatch(DispatchError::Unconfigured)));
        assert!(realm.chat().is_empty());
    }

    #[test]
    fn connect_reuses_matching_credentials() {
        let (mut realm, _) = recording_realm();
        let first = realm.connect("Alice", "h1").unwrap();
        assert!(!first.rejoined);
        realm.set_connected(first.participant.id, false).unwrap();

        let again = realm.connect("Alice", "h1").unwrap();
        assert!(again.rejoined);
        assert_eq!(again.participant.id, first.participant.id);
        assert!(again.participant.connected);

        let impostor = realm.connect("Alice", "wrong").unwrap();
        assert!(!impostor.rejoined);
        assert_eq!(impostor.participant.id, ParticipantId(2));
    }

    #[test]
    fn announce_skips_the_newcomer() {
        let (mut realm, sent) = recording_realm();
        realm.connect("A", "ha").unwrap();
        realm.connect("B", "hb").unwrap();
        let c = realm.connect("C", "hc").unwrap();

        realm.announce(&c).unwrap();
        assert_eq!(recipients(&sent), vec![1, 2]);
        assert!(
            sent.lock()
                .unwrap()
                .iter()
                .all(|(_, packet)| matches!(packet, Packet::ParticipantJoined { .. }))
        );
    }

    #[test]
    fn status_change_notifies_others() {
        let (mut realm, sent) = recording_realm();
        let a = realm.add_participant("A", "ha").unwrap().id;
        realm.add_participant("B", "hb").unwrap();

        realm.set_in_game(a, true).unwrap();
        assert!(realm.roster().find(a).unwrap().in_game);
        assert_eq!(recipients(&sent), vec![2]);
    }

    #[test]
    fn sync_sends_roster_and_chat() {
        let (mut realm, sent) = recording_realm();
        let a = realm.add_participant("A", "ha").unwrap().id;
        realm.post_message(a, "first").unwrap();
        sent.lock().unwrap().clear();

        realm.sync_participant(a).unwrap();
        let sent = sent.lock().unwrap();
        let Some((to, Packet::RealmSync { version, participants, chat })) = sent.first() else {
            panic!("expected a realm sync packet");
        };
        assert_eq!(*to, a);
        assert_eq!(version, FORMAT_VERSION);
        assert_eq!(participants.len(), 1);
        assert_eq!(chat.len(), 1);
    }

    #[test]
    fn forward_item_reaches_only_recipient() {
        let (mut realm, sent) = recording_realm();
        let a = realm.add_participant("A", "ha").unwrap().id;
        let b = realm.add_participant("B", "hb").unwrap().id;

        let mut club = PlainItem::instantiate(&Definition::thing("club").with_quality(), None);
        club.quality = Some(QualityCategory::Good);
        realm.send_item(a, b, &club).unwrap();

        let sent = sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let Some((to, Packet::ItemTransfer { from, item })) = sent.first() else {
            panic!("expected an item transfer");
        };
        assert_eq!((*to, *from), (b, a));
        assert_eq!(item.comp_quality, QualityCategory::Good.ordinal());
    }

    #[test]
    fn forward_unknown_item_is_rejected_before_delivery() {
        let (mut realm, sent) = recording_realm();
        let a = realm.add_participant("A", "ha").unwrap().id;
        let b = realm.add_participant("B", "hb").unwrap().id;

        let record = ItemRecord {
            thing_def_label: String::from("plasma_rifle"),
            stuff_def_label: String::new(),
            stack_count: 1,
            comp_quality: -1,
            hit_points: 10,
        };
        let err = realm.forward_item(a, b, record).unwrap_err();
        assert!(matches!(err, RealmError::Bridge(BridgeError::NotFound { .. })));
        assert!(sent.lock().unwrap().is_empty());
    }

    #[test]
    fn received_item_is_rebuilt_from_catalog() {
        let (realm, _) = recording_realm();
        let record = ItemRecord {
            thing_def_label: String::from("club"),
            stuff_def_label: String::from("wood"),
            stack_count: 2,
            comp_quality: QualityCategory::Excellent.ordinal(),
            hit_points: 70,
        };
        let item: PlainItem = realm.receive_item(&record, PlainItem::instantiate).unwrap();
        assert_eq!(item.stuff_label.as_deref(), Some("wood"));
        assert_eq!(item.quality, Some(QualityCategory::Excellent));
        assert_eq!(item.stack_count, 2);
        assert_eq!(item.hit_points, 70);
    }

    #[test]
    fn character_round_trips_through_realm() {
        let (mut realm, sent) = recording_realm();
        let a = realm.add_participant("A", "ha").unwrap().id;
        let b = realm.add_participant("B", "hb").unwrap().id;
        let veteran = PlainCharacter {
            skills: vec![(String::from("shooting"), 9)],
        };

        realm.send_character(a, b, &veteran).unwrap();
        let record = match sent.lock().unwrap().first() {
            Some((_, Packet::CharacterTransfer { character, .. })) => character.clone(),
            other => panic!("unexpected delivery: {other:?}"),
        };
        let restored: PlainCharacter = realm
            .receive_character(&record, PlainCharacter::default)
            .unwrap();
        assert_eq!(restored, veteran);
    }

    #[test]
    fn forward_character_with_unknown_skill_fails() {
        let (mut realm, _) = recording_realm();
        let a = realm.add_participant("A", "ha").unwrap().id;
        let record = CharacterRecord {
            skills: vec![SkillRecord {
                skill_def_label: String::from("knitting"),
                level: 4,
            }],
        };
        assert!(matches!(
            realm.forward_character(a, a, record),
            Err(RealmError::Bridge(BridgeError::NotFound { .. }))
        ));
    }

    #[test]
    fn snapshot_restores_roster_and_chat() {
        let (mut realm, _) = recording_realm();
        let a = realm.add_participant("A", "ha").unwrap().id;
        realm.add_participant("B", "hb").unwrap();
        realm.post_message(a, "kept").unwrap();

        let snapshot = realm.snapshot();
        let restored = RealmStore::restore(snapshot, catalog()).unwrap();
        assert_eq!(restored.roster().len(), 2);
        assert_eq!(restored.roster().last_given_id(), 2);
        assert!(restored.roster().iter().all(|p| !p.connected));
        assert_eq!(restored.chat().records(), realm.chat().records());
    }

    #[test]
    fn restored_realm_keeps_allocating_after_last_id() {
        let (mut realm, _) = recording_realm();
        realm.add_participant("A", "ha").unwrap();
        let mut snapshot = realm.snapshot();
        snapshot.last_user_given_id = 5;

        let mut restored = RealmStore::restore(snapshot, catalog()).unwrap();
        assert_eq!(restored.add_participant("B", "hb").unwrap().id, ParticipantId(6));
    }

    #[test]
    fn restored_allocator_at_the_limit_never_duplicates() {
        let (realm, _) = recording_realm();
        let mut snapshot = realm.snapshot();
        snapshot.last_user_given_id = u64::MAX - 1;

        let mut restored = RealmStore::restore(snapshot, catalog()).unwrap();
        let a = restored.connect("A", "ha").unwrap().participant.id;
        assert_eq!(a, ParticipantId(u64::MAX));

        assert!(matches!(
            restored.connect("B", "hb"),
            Err(RealmError::IdsExhausted(_))
        ));
        assert_eq!(restored.roster().len(), 1);

        // A known participant can still reconnect.
        let again = restored.connect("A", "ha").unwrap();
        assert!(again.rejoined);
    }

    #[test]
    fn restore_rejects_other_versions() {
        let (realm, _) = recording_realm();
        let mut snapshot = realm.snapshot();
        snapshot.version = String::from("0.3");
        assert!(matches!(
            RealmStore::restore(snapshot, catalog()),
            Err(RealmError::VersionMismatch { found, .. }) if found == "0.3"
        ));
    }

    #[test]
    fn restore_rejects_dangling_chat() {
        let (mut realm, _) = recording_realm();
        realm.add_participant("A", "ha").unwrap();
        let mut snapshot = realm.snapshot();
        snapshot.chat.push(MessageRecord {
            user: ParticipantId(9),
            message: String::from("ghost"),
        });
        assert!(matches!(
            RealmStore::restore(snapshot, catalog()),
            Err(RealmError::CorruptSnapshot(_))
        ));
    }

    #[test]
    fn restore_rejects_unordered_ids() {
        let (mut realm, _) = recording_realm();
        realm.add_participant("A", "ha").unwrap();
        realm.add_participant("B", "hb").unwrap();
        let mut snapshot = realm.snapshot();
        snapshot.users.reverse();
        assert!(matches!(
            RealmStore::restore(snapshot, catalog()),
            Err(RealmError::CorruptSnapshot(_))
        ));
    }

    #[test]
    fn decode_rejects_unknown_author() {
        let (realm, _) = recording_realm();
        let err = realm
            .decode_message(&json!({ "user": 3, "message": "x" }))
            .unwrap_err();
        assert!(matches!(
            err,
            RealmError::Parse(ParseError::Unresolved(NotFound(ParticipantId(3))))
        ));
    }
}
