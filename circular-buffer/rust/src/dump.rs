use std::fmt::{self, Debug, Write};

use crate::ring_buffer::RingBuffer;

impl<T, const N: usize> RingBuffer<T, N> {
    /// Writes one line per storage slot: the slot index, the element or `-` when
    /// the slot is vacant, and ` head`/` tail` markers on the cursor slots.
    ///
    /// ```
    /// use circular_buffer::RingBuffer;
    ///
    /// let mut rb = RingBuffer::<usize, 4>::new_inline();
    /// rb.push_back(10);
    /// rb.push_back(20);
    ///
    /// let mut out = String::new();
    /// rb.dump(&mut out).unwrap();
    /// assert_eq!("0  -\n1  10 head\n2  20 tail\n3  -\n", out);
    /// ```
    pub fn dump<W: Write>(&self, out: &mut W) -> fmt::Result
    where
        T: Debug,
    {
        self.dump_with(out, |out, value| write!(out, "{value:?}"))
    }

    /// Like [`RingBuffer::dump`], with `print` formatting each element.
    pub fn dump_with<W, F>(&self, out: &mut W, mut print: F) -> fmt::Result
    where
        W: Write,
        F: FnMut(&mut W, &T) -> fmt::Result,
    {
        let cursors = self.cursors();

        for slot in 0..N {
            write!(out, "{slot}  ")?;
            match self.slot_ref(slot) {
                Some(value) => print(out, value)?,
                None => out.write_char('-')?,
            }

            if let Some((head, tail)) = cursors {
                if slot == head {
                    out.write_str(" head")?;
                }
                if slot == tail {
                    out.write_str(" tail")?;
                }
            }
            out.write_char('\n')?;
        }

        Ok(())
    }
}
