use std::io::{self, BufRead};

/// Lazy whitespace separated integers. Digits are folded without validation,
/// so a stray byte inside a token yields a meaningless number, not an error.
pub struct Scanner<R> {
	reader: R,
}

impl<R> Scanner<R>
where
	R: BufRead,
{
	pub fn new(reader: R) -> Self {
		Self { reader }
	}

	fn next_byte(&mut self) -> io::Result<Option<u8>> {
		let byte = match self.reader.fill_buf()?.first() {
			Some(&byte) => byte,
			None => return Ok(None),
		};
		self.reader.consume(1);
		Ok(Some(byte))
	}

	fn scan(&mut self) -> io::Result<Option<i64>> {
		let first = loop {
			match self.next_byte()? {
				None => return Ok(None),
				Some(byte) if byte <= b' ' => continue,
				Some(byte) => break byte,
			}
		};

		let negative = first == b'-';
		let mut current = if negative { self.next_byte()? } else { Some(first) };

		let mut value = 0i64;
		while let Some(byte) = current.filter(|&byte| byte > b' ') {
			value = value
				.wrapping_mul(10)
				.wrapping_add(i64::from(byte) - i64::from(b'0'));
			current = self.next_byte()?;
		}

		Ok(Some(if negative { value.wrapping_neg() } else { value }))
	}
}

impl<R> Iterator for Scanner<R>
where
	R: BufRead,
{
	type Item = io::Result<i64>;

	fn next(&mut self) -> Option<Self::Item> {
		self.scan().transpose()
	}
}
